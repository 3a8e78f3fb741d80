use std::{
	fs,
	path::PathBuf,
	sync::Arc,
	time::{SystemTime, UNIX_EPOCH},
};

use vibe_analyzer::{
	AnalysisContext, Config, ConfigError, DetectionEngine, Document, RuleCatalog, RuleId, Severity,
	syntax::make,
};

fn write_temp_config(name: &str, text: &str) -> PathBuf {
	let stamp = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock.").as_nanos();
	let path = std::env::temp_dir().join(format!("vanalyzer-{name}-{stamp}.toml"));

	fs::write(&path, text).expect("Write config.");

	path
}

#[test]
fn configured_catalog_drops_and_reweights_rules() {
	let path = write_temp_config(
		"catalog",
		r#"
[rules]
disabled = ["prefer_class_over_struct"]

[rules.severity]
blank_block_code = "info"
"#,
	);
	let config = Config::load(&path).expect("Load config.");
	let catalog = RuleCatalog::configured(&config).expect("Known rule ids.");

	fs::remove_file(&path).expect("Remove config.");

	assert_eq!(catalog.len(), RuleId::ALL.len() - 1);
	assert!(catalog.get(RuleId::PreferClassOverStruct).is_none());

	let engine = DetectionEngine::new(Arc::new(catalog));
	let root = Document::new(make::struct_decl(&["public"], "Point", vec![])).syntax();
	let block = Document::new(make::block(vec![])).syntax();
	let ctx = AnalysisContext::syntactic();

	assert!(
		engine.analyze(&root, &ctx).iter().all(|diagnostic| diagnostic.rule != RuleId::PreferClassOverStruct)
	);
	assert_eq!(
		engine.analyze(&block, &ctx).iter().map(|diagnostic| diagnostic.severity).collect::<Vec<_>>(),
		vec![Severity::Info]
	);
}

#[test]
fn missing_and_malformed_files_are_errors() {
	let missing = std::env::temp_dir().join("vanalyzer-does-not-exist.toml");

	assert!(matches!(Config::load(&missing), Err(ConfigError::Read { .. })));

	let path = write_temp_config("malformed", "[rules]\nenabled = true\n");
	let result = Config::load(&path);

	fs::remove_file(&path).expect("Remove config.");

	assert!(matches!(result, Err(ConfigError::Parse(_))));
}
