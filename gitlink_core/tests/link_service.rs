use std::sync::{Arc, Mutex};

use camino::{Utf8Path, Utf8PathBuf};
use gitlink_core::inspector::RepositoryInspector;
use gitlink_core::service::LinkService;
use gitlink_core::{EffectError, EffectPipeline, Error, LinkKind, LinkRequest, Result};
use gitlink_effects::{EffectResult, LinkEffect};

const ROOT: &str = "/work/widgets";
const COMMIT: &str = "abc123";

/// Inspector returning canned answers and recording the order of queries.
struct CannedInspector {
    remote: Option<&'static str>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl CannedInspector {
    fn new(remote: Option<&'static str>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let inspector = Self {
            remote,
            calls: Arc::clone(&calls),
        };
        (inspector, calls)
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl RepositoryInspector for CannedInspector {
    fn resolve_root(&self, dir: &Utf8Path) -> Result<Utf8PathBuf> {
        self.record(format!("root {dir}"));
        if dir.starts_with(ROOT) {
            Ok(Utf8PathBuf::from(ROOT))
        } else {
            Err(Error::NotARepository {
                path: dir.to_string(),
                diagnostic: "fatal: not a git repository (or any of the parent directories): .git\n"
                    .into(),
            })
        }
    }

    fn resolve_commit(&self, root: &Utf8Path) -> Result<String> {
        self.record(format!("commit {root}"));
        Ok(COMMIT.into())
    }

    fn resolve_remote(&self, root: &Utf8Path) -> Result<String> {
        self.record(format!("remote {root}"));
        self.remote.map(str::to_owned).ok_or_else(|| Error::NoRemote {
            root: root.to_string(),
            diagnostic: "error: No such remote 'origin'".into(),
        })
    }
}

struct RecordingEffect {
    id: &'static str,
    fail: bool,
    seen: Arc<Mutex<Vec<String>>>,
}

impl LinkEffect for RecordingEffect {
    fn id(&self) -> &'static str {
        self.id
    }

    fn label(&self) -> &'static str {
        if self.id == "clipboard" {
            "copy to clipboard"
        } else {
            "open in browser"
        }
    }

    fn apply(&self, url: &str) -> EffectResult<()> {
        self.seen
            .lock()
            .expect("seen lock")
            .push(format!("{} {url}", self.id));
        if self.fail {
            Err(EffectError::message("exec: \"xclip\": executable file not found"))
        } else {
            Ok(())
        }
    }
}

fn effects(fail_clipboard: bool) -> (EffectPipeline, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let pipeline = EffectPipeline::new()
        .with(RecordingEffect {
            id: "clipboard",
            fail: fail_clipboard,
            seen: Arc::clone(&seen),
        })
        .with(RecordingEffect {
            id: "browser",
            fail: false,
            seen: Arc::clone(&seen),
        });
    (pipeline, seen)
}

fn request(path: &str, line: &str, kind: LinkKind) -> LinkRequest {
    LinkRequest::new(path, line, kind)
}

#[cfg(unix)]
#[test]
fn share_composes_blob_link_and_runs_effects_in_order() -> Result<()> {
    let (inspector, calls) = CannedInspector::new(Some("git@github.com:acme/widgets.git"));
    let (pipeline, seen) = effects(false);
    let service = LinkService::new(inspector, pipeline);

    let link = service.share(&request("/work/widgets/src/main.ext", "42", LinkKind::Blob))?;

    let expected = "https://github.com/acme/widgets/blob/abc123/src/main.ext#L42";
    assert_eq!(link.as_str(), expected);
    assert_eq!(
        *calls.lock().expect("calls lock"),
        vec![
            "root /work/widgets/src",
            "commit /work/widgets",
            "remote /work/widgets"
        ]
    );
    assert_eq!(
        *seen.lock().expect("seen lock"),
        vec![format!("clipboard {expected}"), format!("browser {expected}")]
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn blame_kind_selects_blame_view() -> Result<()> {
    let (inspector, _) = CannedInspector::new(Some("https://github.com/acme/widgets.git"));
    let service = LinkService::new(inspector, EffectPipeline::new());

    let link = service.resolve(&request("/work/widgets/src/main.ext", "42", LinkKind::Blame))?;

    assert_eq!(
        link.as_str(),
        "https://github.com/acme/widgets/blame/abc123/src/main.ext#L42"
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn outside_repository_fails_without_side_effects() {
    let (inspector, calls) = CannedInspector::new(Some("git@github.com:acme/widgets.git"));
    let (pipeline, seen) = effects(false);
    let service = LinkService::new(inspector, pipeline);

    let err = service
        .share(&request("/elsewhere/notes.txt", "1", LinkKind::Blob))
        .unwrap_err();

    assert!(matches!(err, Error::NotARepository { .. }));
    assert_eq!(
        err.to_string().trim(),
        "fatal: not a git repository (or any of the parent directories): .git"
    );
    assert_eq!(calls.lock().expect("calls lock").len(), 1);
    assert!(seen.lock().expect("seen lock").is_empty());
}

#[cfg(unix)]
#[test]
fn missing_remote_stops_before_effects() {
    let (inspector, _) = CannedInspector::new(None);
    let (pipeline, seen) = effects(false);
    let service = LinkService::new(inspector, pipeline);

    let err = service
        .share(&request("/work/widgets/a.rs", "1", LinkKind::Blob))
        .unwrap_err();

    assert!(matches!(err, Error::NoRemote { .. }));
    assert!(seen.lock().expect("seen lock").is_empty());
}

#[cfg(unix)]
#[test]
fn clipboard_failure_aborts_browser() {
    let (inspector, _) = CannedInspector::new(Some("git@github.com:acme/widgets.git"));
    let (pipeline, seen) = effects(true);
    let service = LinkService::new(inspector, pipeline);

    let err = service
        .share(&request("/work/widgets/a.rs", "7", LinkKind::Blob))
        .unwrap_err();

    match &err {
        Error::Effect { effect, .. } => assert_eq!(*effect, "clipboard"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("failed to copy to clipboard: "));
    assert_eq!(seen.lock().expect("seen lock").len(), 1);
}

#[cfg(unix)]
#[test]
fn non_numeric_line_is_embedded_verbatim() -> Result<()> {
    let (inspector, _) = CannedInspector::new(Some("git@malformed"));
    let service = LinkService::new(inspector, EffectPipeline::new());

    let link = service.resolve(&request("/work/widgets/docs/guide.md", "ten", LinkKind::Blob))?;

    assert_eq!(link.as_str(), "https://malformed/blob/abc123/docs/guide.md#Lten");
    Ok(())
}

#[test]
fn relative_request_path_is_rejected() {
    let (inspector, calls) = CannedInspector::new(Some("git@github.com:acme/widgets.git"));
    let service = LinkService::new(inspector, EffectPipeline::new());

    let err = service
        .resolve(&request("src/main.rs", "1", LinkKind::Blob))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidPath { .. }));
    assert!(calls.lock().expect("calls lock").is_empty());
}

#[test]
fn config_controls_effect_order() {
    let config = gitlink_core::config::Config::default().with_flags(false, true);
    let service = LinkService::from_config(&config);
    assert_eq!(
        service.effect_ids().collect::<Vec<_>>(),
        vec!["clipboard", "browser"]
    );

    let service = LinkService::from_config(&gitlink_core::config::Config::default());
    assert_eq!(service.effect_ids().collect::<Vec<_>>(), vec!["clipboard"]);
}
