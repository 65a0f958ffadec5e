#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use redline_config::Settings;
use redline_core::{
    ActionContext, LocalVault, Modal, Presentation, Presenter, UnsupportedVault, redact_file,
};
use redline_runner::ProcessRunner;

const FAKE_TOOL: &str = r#"#!/bin/sh
file="$1"
shift
profile=""
while [ $# -gt 0 ]; do
  case "$1" in
    --profile) profile="$2"; shift 2 ;;
    *) shift ;;
  esac
done
if [ "$profile" = "missing" ]; then
  printf '\033[31mprofile not found\033[0m\n' >&2
  exit 2
fi
printf 'redacted\n' > "$file"
printf '\033[32mReplaced: 3\033[0m\n'
"#;

#[derive(Default)]
struct RecordingPresenter {
    shown: Mutex<Vec<Presentation>>,
}

impl Presenter for RecordingPresenter {
    fn notice(&self, message: &str) {
        self.shown
            .lock()
            .unwrap()
            .push(Presentation::Notice(message.to_string()));
    }

    fn modal(&self, modal: &Modal) {
        self.shown
            .lock()
            .unwrap()
            .push(Presentation::Modal(modal.clone()));
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    tool: PathBuf,
    vault: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let tool = dir.path().join("redact");
    std::fs::write(&tool, FAKE_TOOL).unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    let vault = dir.path().join("vault with spaces");
    std::fs::create_dir_all(vault.join("notes")).unwrap();
    std::fs::write(vault.join("notes").join("a.md"), "my secret").unwrap();

    Fixture {
        _dir: dir,
        tool,
        vault,
    }
}

fn settings(tool: &Path, profile: &str, enable_log: bool, use_shell: bool) -> Settings {
    Settings {
        cli_path: tool.display().to_string(),
        profile: profile.to_string(),
        enable_log,
        custom_args: String::new(),
        use_shell,
        timeout_secs: None,
    }
}

async fn run(settings: &Settings, vault: &dyn redline_core::VaultAdapter) -> Vec<Presentation> {
    let runner = ProcessRunner::new();
    let presenter = RecordingPresenter::default();
    let ctx = ActionContext {
        settings,
        vault,
        runner: &runner,
        presenter: &presenter,
        cancel: None,
    };
    redact_file(&ctx, Path::new("notes/a.md")).await;
    presenter.shown.into_inner().unwrap()
}

#[tokio::test]
async fn test_successful_redaction_shows_output() {
    for use_shell in [false, true] {
        let fx = fixture();
        let shown = run(
            &settings(&fx.tool, "work", true, use_shell),
            &LocalVault::new(&fx.vault),
        )
        .await;

        assert_eq!(
            shown,
            vec![Presentation::Modal(Modal::new(
                "Redaction Complete",
                "Replaced: 3"
            ))],
            "use_shell = {use_shell}"
        );
        let content = std::fs::read_to_string(fx.vault.join("notes").join("a.md")).unwrap();
        assert_eq!(content, "redacted\n");
    }
}

#[tokio::test]
async fn test_failed_redaction_shows_exit_code_and_stderr() {
    let fx = fixture();
    let shown = run(
        &settings(&fx.tool, "missing", true, false),
        &LocalVault::new(&fx.vault),
    )
    .await;

    assert_eq!(
        shown,
        vec![Presentation::Modal(Modal::new(
            "Redaction Failed",
            "Process exited with code 2\n\nprofile not found"
        ))]
    );
    let content = std::fs::read_to_string(fx.vault.join("notes").join("a.md")).unwrap();
    assert_eq!(content, "my secret");
}

#[tokio::test]
async fn test_quiet_success_is_a_notice() {
    let fx = fixture();
    let shown = run(
        &settings(&fx.tool, "", false, false),
        &LocalVault::new(&fx.vault),
    )
    .await;

    assert_eq!(shown, vec![Presentation::Notice("Redacted a.md".to_string())]);
}

#[tokio::test]
async fn test_missing_executable_reports_start_failure() {
    let fx = fixture();
    let shown = run(
        &settings(&fx.vault.join("no-such-tool"), "", false, false),
        &LocalVault::new(&fx.vault),
    )
    .await;

    let [Presentation::Modal(modal)] = shown.as_slice() else {
        panic!("expected a single modal, got {shown:?}");
    };
    assert_eq!(modal.title(), "Redaction Failed");
    assert!(modal.body().starts_with("Failed to start process:"));
}

#[tokio::test]
async fn test_remote_vault_is_unsupported() {
    let fx = fixture();
    let shown = run(
        &settings(&fx.tool, "work", true, false),
        &UnsupportedVault {
            location: "https://sync.example.com/vault".to_string(),
        },
    )
    .await;

    assert_eq!(
        shown,
        vec![Presentation::Notice(
            "Redaction is only supported for local vaults".to_string()
        )]
    );
    let content = std::fs::read_to_string(fx.vault.join("notes").join("a.md")).unwrap();
    assert_eq!(content, "my secret");
}
