mod common;

use common::{run_writewise, stderr_of, stdout_of, TestEnv};

#[test]
fn writewise_help_shows_usage() {
    let output = run_writewise(&["--help"]);
    let stdout = stdout_of(&output);
    let stderr = stderr_of(&output);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("generate"));
}

#[test]
fn writewise_version_shows_version() {
    let output = run_writewise(&["--version"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.contains("writewise "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_writewise(&["completions", "bash"]);
    let stdout = stdout_of(&output);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstderr:\n{}",
        stderr_of(&output)
    );
    assert!(stdout.contains("writewise"));
}

#[test]
fn config_show_works() {
    let output = run_writewise(&["config", "show"]);
    let stdout = stdout_of(&output);

    assert!(
        output.status.success(),
        "config show should succeed\nstderr:\n{}",
        stderr_of(&output)
    );
    assert!(stdout.contains("[http]"));
    assert!(stdout.contains("timeout_secs"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_writewise(&["config", "path"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success(), "stderr:\n{}", stderr_of(&first));
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(stderr_of(&second).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn status_reports_unconfigured_profile() {
    let output = run_writewise(&["status"]);
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "stderr:\n{}", stderr_of(&output));
    assert!(stdout.contains("Provider: (none)"));
    assert!(stdout.contains("API key: (not set)"));
    assert!(stdout.contains("Not configured yet"));
}

#[test]
fn models_reports_empty_cache() {
    let output = run_writewise(&["models"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No cached models"));
}

#[test]
fn prompt_override_can_be_set_and_reset() {
    let env = TestEnv::new();

    let shown = env.run(&["prompt", "show"]);
    assert!(shown.status.success());
    assert!(stdout_of(&shown).contains("You are WriteWise"));
    assert!(stderr_of(&shown).contains("(default)"));

    let set = env.run(&["prompt", "set", "Make this shorter: [INPUT] ([TONE])"]);
    assert!(set.status.success(), "stderr:\n{}", stderr_of(&set));

    let shown = env.run(&["prompt", "show"]);
    assert_eq!(stdout_of(&shown).trim(), "Make this shorter: [INPUT] ([TONE])");
    assert!(stderr_of(&shown).contains("(override)"));

    let reset = env.run(&["prompt", "reset"]);
    assert!(reset.status.success());

    let shown = env.run(&["prompt", "show"]);
    assert!(stdout_of(&shown).contains("You are WriteWise"));
}

#[test]
fn prompt_set_warns_when_input_placeholder_is_missing() {
    let output = run_writewise(&["prompt", "set", "Tone is [TONE]"]);
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("no [INPUT] placeholder"));
}

#[test]
fn clear_requires_confirmation() {
    let env = TestEnv::new();

    let refused = env.run(&["clear"]);
    assert!(!refused.status.success());
    assert!(stderr_of(&refused).contains("--yes"));

    let cleared = env.run(&["clear", "--yes"]);
    assert!(cleared.status.success());
    assert!(stdout_of(&cleared).contains("All data cleared!"));
}

#[test]
fn setup_offline_requires_a_model() {
    let output = run_writewise(&["setup", "--provider", "gpt", "--api-key", "k", "--offline"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Pass --model"));
}

#[test]
fn setup_offline_saves_profile() {
    let env = TestEnv::new();

    let output = env.run(&[
        "setup",
        "--provider",
        "gemini",
        "--api-key",
        "secret-key-9876",
        "--model",
        "models/gemini-pro",
        "--tone",
        "friendly",
        "--offline",
    ]);
    assert!(output.status.success(), "stderr:\n{}", stderr_of(&output));

    let status = stdout_of(&env.run(&["status"]));
    assert!(status.contains("Provider: gemini"));
    assert!(status.contains("API key: ****9876"));
    assert!(!status.contains("secret-key"));
    assert!(status.contains("Model: models/gemini-pro"));
    assert!(status.contains("Tone: friendly"));
    assert!(status.contains("Purpose: general"));
    assert!(!status.contains("Not configured yet"));
}
