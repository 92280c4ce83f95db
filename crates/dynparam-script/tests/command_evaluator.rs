//! Integration tests for shell-backed evaluation wired into the binder.

use std::sync::Arc;

use dynparam_core::{
    ChoiceParameterDefinition, ChoiceResolver, EvaluationError, ParameterBinder, RejectionKind,
    Script, ScriptEvaluator, ScriptResult, Submission,
};
use dynparam_script::{CommandScriptEvaluator, EvaluatorConfig, OutputFormat, ScriptHostConfig};
use serde_json::json;

fn binder(config: EvaluatorConfig) -> ParameterBinder {
    ParameterBinder::new(ChoiceResolver::new(Arc::new(CommandScriptEvaluator::new(
        config,
    ))))
}

/// Test: a JSON array printed by the script becomes the domain
#[test]
fn test_json_script_domain() {
    let evaluator = CommandScriptEvaluator::new(EvaluatorConfig::default());
    let result = evaluator
        .evaluate(&Script::new(r#"echo '["a","b","c"]'"#), false)
        .expect("evaluation failed");
    assert_eq!(
        result,
        ScriptResult::Sequence(vec![json!("a"), json!("b"), json!("c")])
    );
}

/// Test: binding accepts members and rejects non-members of a live script domain
#[test]
fn test_binding_against_shell_script() {
    let binder = binder(EvaluatorConfig::default());
    let spec = ChoiceParameterDefinition::new(
        "env",
        r#"echo '["dev","staging",5]'"#,
        "Target environment",
        None,
        false,
    )
    .unwrap();

    let bound = binder
        .create_bound_value(&spec, &Submission::single("staging"))
        .expect("staging is legal");
    assert_eq!(bound.value, "staging");

    assert!(binder
        .create_bound_value(&spec, &Submission::single("5"))
        .is_ok());

    let err = binder
        .create_bound_value(&spec, &Submission::single("prod"))
        .unwrap_err();
    assert_eq!(err.kind(), RejectionKind::IllegalChoice);
}

/// Test: every validation re-runs the script, so a changed source is seen immediately
#[test]
fn test_domain_tracks_live_source() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("hosts.txt");
    std::fs::write(&inventory, "web-1\nweb-2\n").unwrap();

    let binder = binder(EvaluatorConfig::default().with_output(OutputFormat::Lines));
    let spec = ChoiceParameterDefinition::new(
        "host",
        format!("cat '{}'", inventory.display()),
        "",
        None,
        false,
    )
    .unwrap();

    assert!(binder.create_value(&spec, &["web-2".to_string()]).is_ok());

    std::fs::write(&inventory, "web-1\nweb-3\n").unwrap();
    let err = binder.create_value(&spec, &["web-2".to_string()]).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::IllegalChoice);
    assert!(binder.create_value(&spec, &["web-3".to_string()]).is_ok());
}

/// Test: a scalar script output leaves nothing valid
#[test]
fn test_scalar_output_rejects_submissions() {
    let binder = binder(EvaluatorConfig::default());
    let spec = ChoiceParameterDefinition::new("count", "echo 5", "", None, false).unwrap();

    let domain = binder.resolver().resolve_choices(&spec).unwrap();
    assert!(domain.is_empty());
    let err = binder.create_value(&spec, &["5".to_string()]).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::IllegalChoice);
}

/// Test: a failing script rejects the binding with an evaluation failure
#[test]
fn test_failing_script_rejects_binding() {
    let binder = binder(EvaluatorConfig::default());
    let spec =
        ChoiceParameterDefinition::new("env", "echo nope >&2; exit 2", "", None, false).unwrap();

    let err = binder.create_value(&spec, &["a".to_string()]).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::EvaluationFailure);
    assert!(err.to_string().contains("exited with code 2"));
}

/// Launcher that joins its trailing arguments into one command line for a
/// fresh shell, the way `ssh host cmd...` does on the remote side.
fn argv_joining_launcher() -> Vec<String> {
    ["sh", "-c", r#"sh -c "$*""#, "remote-host", "sh", "-c"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Test: remote definitions go through the remote launcher
#[test]
fn test_remote_launcher_is_used() {
    let binder = binder(EvaluatorConfig::default().with_remote_launcher(argv_joining_launcher()));
    let spec =
        ChoiceParameterDefinition::new("node", r#"echo '["n1","n2"]'"#, "", None, true).unwrap();
    assert!(binder.create_value(&spec, &["n2".to_string()]).is_ok());
}

/// Test: quoting in the source survives a launcher that re-parses its argv
#[test]
fn test_remote_source_keeps_quoting() {
    let config = EvaluatorConfig::default().with_remote_launcher(argv_joining_launcher());
    let evaluator = CommandScriptEvaluator::new(config.clone());
    let result = evaluator
        .evaluate(&Script::new(r#"echo '["dev","staging","prod"]'"#), true)
        .expect("evaluation failed");
    assert_eq!(
        result,
        ScriptResult::Sequence(vec![json!("dev"), json!("staging"), json!("prod")])
    );

    let binder = binder(config);
    let spec = ChoiceParameterDefinition::new(
        "env",
        r#"echo '["dev","staging","prod"]'"#,
        "",
        None,
        true,
    )
    .unwrap();
    assert_eq!(
        binder
            .create_value(&spec, &["staging".to_string()])
            .unwrap()
            .value,
        "staging"
    );
}

/// Test: remote definitions fail closed without a remote launcher
#[test]
fn test_remote_without_launcher_fails() {
    let evaluator = CommandScriptEvaluator::new(EvaluatorConfig::default());
    let err = evaluator
        .evaluate(&Script::new("echo '[]'"), true)
        .unwrap_err();
    assert!(matches!(err, EvaluationError::RemoteUnavailable));
}

/// Test: async hosts can evaluate without the private runtime
#[tokio::test]
async fn test_evaluate_async() {
    let evaluator = CommandScriptEvaluator::new(EvaluatorConfig::default());
    let result = evaluator
        .evaluate_async(&Script::new("echo '[1,2]'"), false)
        .await
        .expect("evaluation failed");
    assert_eq!(result, ScriptResult::Sequence(vec![json!(1), json!(2)]));
}

/// Test: the sync path works from inside a multi-thread runtime
#[tokio::test(flavor = "multi_thread")]
async fn test_sync_binding_inside_multi_thread_runtime() {
    let binder = binder(EvaluatorConfig::default());
    let spec =
        ChoiceParameterDefinition::new("env", r#"echo '["dev","prod"]'"#, "", None, false).unwrap();
    let bound = binder
        .create_value(&spec, &["prod".to_string()])
        .expect("prod is legal");
    assert_eq!(bound.value, "prod");
}

/// Test: the sync path inside a current-thread runtime fails the binding instead of panicking
#[tokio::test]
async fn test_sync_binding_inside_current_thread_runtime() {
    let binder = binder(EvaluatorConfig::default());
    let spec =
        ChoiceParameterDefinition::new("env", r#"echo '["dev","prod"]'"#, "", None, false).unwrap();
    let err = binder
        .create_value(&spec, &["prod".to_string()])
        .unwrap_err();
    assert_eq!(err.kind(), RejectionKind::EvaluationFailure);
    assert!(err.to_string().contains("current-thread"));
}

/// Test: definitions and evaluator settings loaded from TOML work end to end
#[test]
fn test_config_driven_binding() {
    let config = ScriptHostConfig::from_toml(
        r#"
        [evaluator]
        output = "lines"

        [evaluator.env]
        REGIONS = "eu us"

        [[parameters]]
        name = "region"
        script = "for r in $REGIONS; do echo $r; done"
        description = "Deployment region"
        default_value = "eu"
        "#,
    )
    .unwrap();

    let binder = binder(config.evaluator.clone());
    let spec = config.parameter("region").unwrap();

    assert_eq!(
        binder.resolver().choice_labels(spec).unwrap(),
        vec!["eu", "us"]
    );
    assert_eq!(binder.create_value(spec, &[]).unwrap().value, "eu");
    assert!(binder.create_value(spec, &["us".to_string()]).is_ok());
    assert!(binder.create_value(spec, &["ap".to_string()]).is_err());
}
