//! Syntax tree arena.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. The
//! parser allocates every node after all of its children, so ascending id
//! order is a valid bottom-up (children before parents) order. Parent links
//! are filled in once, after parsing, and are only used for upward queries.

use smallvec::SmallVec;

use crate::Span;

/// Index of a node in an [`Ast`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a parent positions a child.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Role {
    Statement,
    Expression,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOperator {
    /// `not`
    Not,
    /// `!`
    Bang,
    Negate,
    Plus,
    Typeof,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    /// `%%`, always-positive modulo.
    Modulo,
    Power,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    /// `is` / `==`
    Equal,
    /// `isnt` / `!=`
    NotEqual,
    /// `and` / `&&`
    And,
    /// `or` / `||`
    Or,
    In,
    /// `a ? b`
    Existential,
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Less
                | BinaryOperator::Greater
                | BinaryOperator::LessEq
                | BinaryOperator::GreaterEq
                | BinaryOperator::Equal
                | BinaryOperator::NotEqual
        )
    }
}

/// Operator of a `||=`, `&&=` or `?=` assignment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOperator {
    Or,
    And,
    Exist,
}

/// Node payload. Child fields hold ids; spans of names that are not nodes
/// (member names) are stored inline.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum NodeKind {
    Program {
        body: NodeId,
    },
    /// Statement list. `inline` blocks were written on the same line as the
    /// construct that owns them (`if a then b`).
    Block {
        statements: Vec<NodeId>,
        inline: bool,
    },

    Identifier(String),
    Number,
    String,
    Regex,
    Bool,
    Null,
    Undefined,
    /// `this` or a bare `@`.
    This,

    /// `a.b`, and `@b` where `expression` is the `@`.
    MemberAccess {
        expression: NodeId,
        member: Span,
    },
    SoakedMemberAccess {
        expression: NodeId,
        member: Span,
    },
    DynamicMemberAccess {
        expression: NodeId,
        index: NodeId,
    },
    SoakedDynamicMemberAccess {
        expression: NodeId,
        index: NodeId,
    },
    FunctionApplication {
        function: NodeId,
        arguments: Vec<NodeId>,
    },
    SoakedFunctionApplication {
        function: NodeId,
        arguments: Vec<NodeId>,
    },
    NewOp {
        ctor: NodeId,
        arguments: Vec<NodeId>,
    },

    ArrayInitialiser {
        members: Vec<NodeId>,
    },
    ObjectInitialiser {
        members: Vec<NodeId>,
    },
    /// `key: value`, or shorthand `key` when `value` is `None`.
    ObjectMember {
        key: NodeId,
        value: Option<NodeId>,
    },

    UnaryOp {
        op: UnaryOperator,
        expression: NodeId,
    },
    /// Postfix existence check `a?`.
    ExistsOp {
        expression: NodeId,
    },
    BinaryOp {
        op: BinaryOperator,
        left: NodeId,
        right: NodeId,
    },
    /// Two or more comparisons in a row, `a < b < c`.
    ChainedComparison {
        operands: Vec<NodeId>,
    },

    AssignOp {
        assignee: NodeId,
        expression: NodeId,
    },
    CompoundAssignOp {
        op: BinaryOperator,
        assignee: NodeId,
        expression: NodeId,
    },
    LogicalAssignOp {
        op: LogicalOperator,
        assignee: NodeId,
        expression: NodeId,
    },

    Function {
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
        bound: bool,
    },
    DefaultParam {
        param: NodeId,
        default: NodeId,
    },

    Conditional {
        condition: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
        negated: bool,
        postfix: bool,
    },
    /// `while`, `until`, `loop`, and their postfix forms. `condition` is
    /// `None` only for `loop`.
    While {
        condition: Option<NodeId>,
        body: NodeId,
        negated: bool,
        postfix: bool,
        is_loop: bool,
    },

    Return {
        expression: Option<NodeId>,
    },
    Throw {
        expression: NodeId,
    },
    Break,
    Continue,
}

impl NodeKind {
    /// Short tag for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Number => "Number",
            NodeKind::String => "String",
            NodeKind::Regex => "Regex",
            NodeKind::Bool => "Bool",
            NodeKind::Null => "Null",
            NodeKind::Undefined => "Undefined",
            NodeKind::This => "This",
            NodeKind::MemberAccess { .. } => "MemberAccess",
            NodeKind::SoakedMemberAccess { .. } => "SoakedMemberAccess",
            NodeKind::DynamicMemberAccess { .. } => "DynamicMemberAccess",
            NodeKind::SoakedDynamicMemberAccess { .. } => "SoakedDynamicMemberAccess",
            NodeKind::FunctionApplication { .. } => "FunctionApplication",
            NodeKind::SoakedFunctionApplication { .. } => "SoakedFunctionApplication",
            NodeKind::NewOp { .. } => "NewOp",
            NodeKind::ArrayInitialiser { .. } => "ArrayInitialiser",
            NodeKind::ObjectInitialiser { .. } => "ObjectInitialiser",
            NodeKind::ObjectMember { .. } => "ObjectMember",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::ExistsOp { .. } => "ExistsOp",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::ChainedComparison { .. } => "ChainedComparison",
            NodeKind::AssignOp { .. } => "AssignOp",
            NodeKind::CompoundAssignOp { .. } => "CompoundAssignOp",
            NodeKind::LogicalAssignOp { .. } => "LogicalAssignOp",
            NodeKind::Function { .. } => "Function",
            NodeKind::DefaultParam { .. } => "DefaultParam",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::While { .. } => "While",
            NodeKind::Return { .. } => "Return",
            NodeKind::Throw { .. } => "Throw",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
        }
    }

    /// Child ids in source order.
    pub fn children(&self) -> SmallVec<[NodeId; 4]> {
        self.children_with_roles().into_iter().map(|(id, _)| id).collect()
    }

    /// Child ids in source order, each with the role a parent that has no
    /// special handling should patch it in: block-shaped slots are
    /// statements, everything else is an expression.
    pub fn children_with_roles(&self) -> SmallVec<[(NodeId, Role); 4]> {
        use Role::{Expression, Statement};

        let mut out: SmallVec<[(NodeId, Role); 4]> = SmallVec::new();
        match self {
            NodeKind::Program { body } => out.push((*body, Statement)),
            NodeKind::Block { statements, .. } => {
                out.extend(statements.iter().map(|&s| (s, Statement)));
            }
            NodeKind::Identifier(_)
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::Regex
            | NodeKind::Bool
            | NodeKind::Null
            | NodeKind::Undefined
            | NodeKind::This
            | NodeKind::Break
            | NodeKind::Continue => {}
            NodeKind::MemberAccess { expression, .. }
            | NodeKind::SoakedMemberAccess { expression, .. }
            | NodeKind::UnaryOp { expression, .. }
            | NodeKind::ExistsOp { expression }
            | NodeKind::Throw { expression } => out.push((*expression, Expression)),
            NodeKind::DynamicMemberAccess { expression, index }
            | NodeKind::SoakedDynamicMemberAccess { expression, index } => {
                out.push((*expression, Expression));
                out.push((*index, Expression));
            }
            NodeKind::FunctionApplication {
                function,
                arguments,
            }
            | NodeKind::SoakedFunctionApplication {
                function,
                arguments,
            }
            | NodeKind::NewOp {
                ctor: function,
                arguments,
            } => {
                out.push((*function, Expression));
                out.extend(arguments.iter().map(|&a| (a, Expression)));
            }
            NodeKind::ArrayInitialiser { members } | NodeKind::ObjectInitialiser { members } => {
                out.extend(members.iter().map(|&m| (m, Expression)));
            }
            NodeKind::ObjectMember { key, value } => {
                out.push((*key, Expression));
                out.extend(value.iter().map(|&v| (v, Expression)));
            }
            NodeKind::BinaryOp { left, right, .. } => {
                out.push((*left, Expression));
                out.push((*right, Expression));
            }
            NodeKind::ChainedComparison { operands } => {
                out.extend(operands.iter().map(|&o| (o, Expression)));
            }
            NodeKind::AssignOp {
                assignee,
                expression,
            }
            | NodeKind::CompoundAssignOp {
                assignee,
                expression,
                ..
            }
            | NodeKind::LogicalAssignOp {
                assignee,
                expression,
                ..
            } => {
                out.push((*assignee, Expression));
                out.push((*expression, Expression));
            }
            NodeKind::Function {
                parameters, body, ..
            } => {
                out.extend(parameters.iter().map(|&p| (p, Expression)));
                out.extend(body.iter().map(|&b| (b, Statement)));
            }
            NodeKind::DefaultParam { param, default } => {
                out.push((*param, Expression));
                out.push((*default, Expression));
            }
            NodeKind::Conditional {
                condition,
                consequent,
                alternate,
                postfix,
                ..
            } => {
                // Postfix forms keep their source order: body first.
                if *postfix {
                    out.push((*consequent, Statement));
                    out.push((*condition, Expression));
                } else {
                    out.push((*condition, Expression));
                    out.push((*consequent, Statement));
                }
                out.extend(alternate.iter().map(|&a| (a, Statement)));
            }
            NodeKind::While {
                condition,
                body,
                postfix,
                ..
            } => {
                if *postfix {
                    out.push((*body, Statement));
                    out.extend(condition.iter().map(|&c| (c, Expression)));
                } else {
                    out.extend(condition.iter().map(|&c| (c, Expression)));
                    out.push((*body, Statement));
                }
            }
            NodeKind::Return { expression } => {
                out.extend(expression.iter().map(|&e| (e, Expression)));
            }
        }
        out
    }
}

/// A syntax node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// Arena of nodes for one parse.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Empty arena; the root is fixed by [`Ast::finish`].
    pub fn new() -> Self {
        Ast {
            nodes: Vec::new(),
            root: NodeId(0),
        }
    }

    /// Allocate a node. All of its children must already be allocated.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        debug_assert!(
            kind.children().iter().all(|c| *c < id),
            "children must be allocated before their parent"
        );
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    /// Set the root and link every child to its parent.
    pub fn finish(&mut self, root: NodeId) {
        self.root = root;
        for index in 0..self.nodes.len() {
            let parent = NodeId(index as u32);
            for child in self.nodes[index].kind.children() {
                self.nodes[child.index()].parent = Some(parent);
            }
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// All ids in allocation (bottom-up) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Name of an identifier node.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Whether `id` is the object (`a` in `a.b`, `a[b]`, `a(b)`) of its parent.
    pub fn is_object_of_parent(&self, id: NodeId) -> bool {
        self.parent(id).is_some_and(|p| self.object_of(p) == Some(id))
    }

    /// The object of an access or call chain link.
    pub fn object_of(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::MemberAccess { expression, .. }
            | NodeKind::SoakedMemberAccess { expression, .. }
            | NodeKind::DynamicMemberAccess { expression, .. }
            | NodeKind::SoakedDynamicMemberAccess { expression, .. } => Some(*expression),
            NodeKind::FunctionApplication { function, .. }
            | NodeKind::SoakedFunctionApplication { function, .. } => Some(*function),
            _ => None,
        }
    }

    /// Whether the node is a soaked access or call.
    pub fn is_soaked(&self, id: NodeId) -> bool {
        matches!(
            self.kind(id),
            NodeKind::SoakedMemberAccess { .. }
                | NodeKind::SoakedDynamicMemberAccess { .. }
                | NodeKind::SoakedFunctionApplication { .. }
        )
    }

    /// Whether a block is the body of the program or of a function.
    pub fn is_scope_root_block(&self, block: NodeId) -> bool {
        matches!(self.kind(block), NodeKind::Block { .. })
            && self.parent(block).is_some_and(|p| {
                matches!(
                    self.kind(p),
                    NodeKind::Program { .. } | NodeKind::Function { .. }
                )
            })
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}
