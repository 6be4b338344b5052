use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

mod common;
use common::TestEnv;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).expect("read schema");
    serde_json::from_str(&raw).expect("parse schema")
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn sdist_json_matches_contract() {
    let env = TestEnv::new();
    let out = env.run_json_repo(&["sdist", "--version", "0.6.4"]);
    validate("sdist.schema.json", &out);
}

#[test]
fn release_check_json_matches_contract() {
    let env = TestEnv::new();
    let out = env.run_json_repo(&["check"]);
    validate("release_check.schema.json", &out);
}

#[test]
fn meta_show_json_matches_contract() {
    let env = TestEnv::new();
    let pkg = env.pkg_dir();
    let out = env.run_json(&["meta", "show", pkg.to_str().expect("pkg utf8")]);
    validate("meta_show.schema.json", &out);
}
