use super::*;

#[test]
fn test_defaults_run_everything_strictly() {
    let options = Options::default();
    assert!(!options.loose_default_params);
    assert_eq!(options.module_format, ModuleFormat::CommonJs);
    assert_eq!(options.run_to_stage, None);
}

#[test]
fn test_builders() {
    let options = Options::default()
        .with_loose_default_params(true)
        .with_module_format(ModuleFormat::Esm)
        .with_run_to_stage(StageName::Normalize);
    assert!(options.loose_default_params);
    assert_eq!(options.module_format, ModuleFormat::Esm);
    assert_eq!(options.run_to_stage, Some(StageName::Normalize));
}

#[test]
fn test_stage_names_round_trip_through_text() {
    assert_eq!(StageName::parse("main"), Some(StageName::Main));
    assert_eq!(StageName::parse(StageName::Normalize.as_str()), Some(StageName::Normalize));
    assert_eq!(StageName::parse("lint"), None);
}
