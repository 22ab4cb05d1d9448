use config::{DiffAction, ItemPath};
use outline::{ActionDescriptor, Collapsible, DiffChoice, NodeId};
use walkthru_engine::{Engine, Error, Outcome, QuizSignal, test_support::MockHost};

const DEMO: &str = r#"{
    "title": "Demo",
    "items": [
        { "type": "folder", "label": "F", "folderIconColor": "red", "items": [
            { "type": "file", "label": "X", "path": "a.txt" }
        ]}
    ]
}"#;

const TOUR: &str = r#"{
    "title": "Tour",
    "items": [
        { "type": "title", "label": "Intro", "soundPath": "intro.wav" },
        { "type": "file", "label": "Main", "path": "src/main.rs", "line": 3,
          "highlightStartLine": 3, "highlightEndLine": 5,
          "soundPath": "whoosh.wav", "closeSoundPath": "close.wav" },
        { "type": "dialog", "label": "Note", "message": "Hello", "severity": "warning" },
        { "type": "diff", "label": "Patch", "diffPath": "p.diff", "revertSoundPath": "undo.wav" },
        { "type": "diff", "label": "Preview", "diffPath": "q.diff", "action": "preview" },
        { "type": "quiz", "label": "Q", "question": "2+2?",
          "correctAnswers": ["4"], "wrongAnswers": ["3", "5"], "revealSoundPath": "tada.wav" },
        { "type": "browser", "label": "Docs", "url": "https://example.com", "browserType": "external" },
        { "type": "folder", "label": "Empty", "items": [] },
        { "type": "title", "label": "Quiet" }
    ]
}"#;

fn path(s: &str) -> ItemPath {
    s.parse().unwrap()
}

fn engine_with(json: &str) -> Engine<MockHost> {
    let mut engine = Engine::with_seed(MockHost::new(), 7);
    engine.load_str(json, None).unwrap();
    engine
}

#[tokio::test(flavor = "current_thread")]
async fn end_to_end_expand_and_open() {
    let mut engine = engine_with(DEMO);
    let roots = engine.children_of(None);
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].collapsible, Collapsible::Collapsed);

    assert!(engine.set_expanded(&path("0"), true));
    let roots = engine.children_of(None);
    assert_eq!(roots[0].collapsible, Collapsible::Expanded);

    let kids = engine.children_of(Some(&roots[0]));
    assert_eq!(kids.len(), 1);
    let x = &kids[0];
    assert_eq!(x.decoration.icon_color.as_deref(), Some("red"));
    assert_eq!(
        x.action,
        Some(ActionDescriptor::OpenFile {
            path: "a.txt".into(),
            line: None,
            highlight: None
        })
    );

    assert_eq!(engine.activate_node(x).await.unwrap(), Outcome::Done);
    assert_eq!(engine.host().calls(), vec!["open_file:a.txt"]);
}

#[tokio::test(flavor = "current_thread")]
async fn bootstrap_requests_a_load() {
    let mut engine = Engine::with_seed(MockHost::new(), 1);
    let roots = engine.children_of(None);
    assert_eq!(roots[0].id, NodeId::Bootstrap);
    assert_eq!(
        engine.activate_node(&roots[0]).await.unwrap(),
        Outcome::LoadRequested
    );
    assert!(engine.host().calls().is_empty());
    assert!(matches!(
        engine.activate(&path("0")).await,
        Err(Error::NotLoaded)
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn title_sound_and_accompaniment() {
    let mut engine = engine_with(TOUR);
    assert_eq!(engine.activate(&path("0")).await.unwrap(), Outcome::Done);
    assert_eq!(engine.host().calls(), vec!["play_sound:intro.wav"]);

    engine.host().clear();
    engine.activate(&path("1")).await.unwrap();
    assert_eq!(
        engine.host().calls(),
        vec!["open_file:src/main.rs:3:3-5", "play_sound:whoosh.wav"]
    );

    engine.host().clear();
    assert_eq!(engine.activate(&path("8")).await.unwrap(), Outcome::NoAction);
    assert_eq!(engine.activate(&path("7")).await.unwrap(), Outcome::NoAction);
    assert!(engine.host().calls().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn muted_sounds_never_reach_host() {
    let mut engine = engine_with(TOUR);
    engine.mute();
    engine.activate(&path("0")).await.unwrap();
    engine.activate(&path("1")).await.unwrap();
    engine.activate_context(&path("1")).await.unwrap();
    assert_eq!(engine.host().count("play_sound"), 0);
    assert!(engine.host().calls_contains("close_file:src/main.rs"));

    assert!(!engine.toggle_mute());
    engine.activate(&path("0")).await.unwrap();
    assert!(engine.host().calls_contains("play_sound:intro.wav"));
}

#[tokio::test(flavor = "current_thread")]
async fn shared_sound_state_mutes_engine() {
    let mut engine = engine_with(TOUR);
    engine.sounds().mute();
    engine.activate(&path("0")).await.unwrap();
    assert_eq!(engine.host().count("play_sound"), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn diff_without_action_prompts_with_two_choices() {
    let mut engine = engine_with(TOUR);
    let roots = engine.children_of(None);
    assert_eq!(
        roots[3].action,
        Some(ActionDescriptor::ApplyDiff {
            diff_path: "p.diff".into(),
            choice: DiffChoice::Prompt([DiffAction::Apply, DiffAction::Preview]),
        })
    );

    engine.host().set_diff_choice(Some(DiffAction::Apply));
    assert_eq!(engine.activate(&path("3")).await.unwrap(), Outcome::Done);
    assert_eq!(
        engine.host().calls(),
        vec![
            "choose_diff_action:p.diff:apply|preview",
            "apply_diff:p.diff:apply"
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dismissed_diff_prompt_is_cancelled() {
    let mut engine = engine_with(TOUR);
    engine.host().set_diff_choice(None);
    assert_eq!(engine.activate(&path("3")).await.unwrap(), Outcome::Cancelled);
    assert_eq!(engine.host().count("apply_diff"), 0);
    assert_eq!(engine.host().count("report_error"), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn decided_diff_skips_prompt() {
    let mut engine = engine_with(TOUR);
    engine.activate(&path("4")).await.unwrap();
    assert_eq!(engine.host().calls(), vec!["apply_diff:q.diff:preview"]);
}

#[tokio::test(flavor = "current_thread")]
async fn context_actions() {
    let mut engine = engine_with(TOUR);
    engine.activate_context(&path("3")).await.unwrap();
    assert_eq!(
        engine.host().calls(),
        vec!["revert_diff:p.diff", "play_sound:undo.wav"]
    );
    assert_eq!(
        engine.activate_context(&path("2")).await.unwrap(),
        Outcome::NoAction
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dialog_and_browser() {
    let mut engine = engine_with(TOUR);
    engine.activate(&path("2")).await.unwrap();
    engine.activate(&path("6")).await.unwrap();
    assert_eq!(
        engine.host().calls(),
        vec![
            "show_dialog:warning:Hello",
            "open_browser:https://example.com:external:Docs"
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn host_failure_is_reported_and_state_survives() {
    let mut engine = engine_with(DEMO);
    engine.set_expanded(&path("0"), true);
    engine.host().fail_on("open_file");

    let outcome = engine.activate(&path("0.0")).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Failed {
            message: "open_file failed".into()
        }
    );
    assert!(engine.host().calls_contains("report_error:open_file failed"));
    assert!(engine.outline().is_expanded(&path("0")));
    assert_eq!(engine.config().unwrap().title, "Demo");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_reload_keeps_previous_walkthrough() {
    let mut engine = engine_with(DEMO);
    let err = engine.load_str("{ not json", None).unwrap_err();
    assert!(matches!(err, Error::Config(ref e) if e.is_parse()));
    assert_eq!(engine.config().unwrap().title, "Demo");

    let err = engine
        .load_str(r#"{ "title": "T", "items": [ { "type": "nope", "label": "x" } ] }"#, None)
        .unwrap_err();
    assert!(matches!(err, Error::Config(ref e) if e.is_schema()));
    assert_eq!(engine.children_of(None)[0].label, "F");

    engine.reset();
    assert_eq!(engine.children_of(None)[0].id, NodeId::Bootstrap);
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_path_is_item_not_found() {
    let mut engine = engine_with(DEMO);
    assert!(matches!(
        engine.activate(&path("4.2")).await,
        Err(Error::ItemNotFound(_))
    ));
    assert!(matches!(
        engine.activate_context(&path("9")).await,
        Err(Error::ItemNotFound(_))
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_reveals_once_with_sound() {
    let mut engine = engine_with(TOUR);
    engine
        .host()
        .push_quiz_signals(&[QuizSignal::Reveal, QuizSignal::Reveal, QuizSignal::Close]);
    assert_eq!(engine.activate(&path("5")).await.unwrap(), Outcome::Done);

    assert_eq!(
        engine.host().calls(),
        vec![
            "show_quiz:unrevealed",
            "play_sound:tada.wav",
            "show_quiz:revealed",
            "show_quiz:revealed"
        ]
    );
    let views = engine.host().quiz_views();
    assert!(views[0].answers.iter().all(|a| a.correct.is_none()));
    let last = views.last().unwrap();
    assert_eq!(last.answers.len(), 3);
    assert_eq!(
        last.answers.iter().filter(|a| a.correct == Some(true)).count(),
        1
    );
    let first_order: Vec<_> = views[0].answers.iter().map(|a| &a.text).collect();
    let last_order: Vec<_> = last.answers.iter().map(|a| &a.text).collect();
    assert_eq!(first_order, last_order);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_reveal_sound_still_shows_answers() {
    let mut engine = engine_with(TOUR);
    engine.host().fail_on("play_sound");
    engine
        .host()
        .push_quiz_signals(&[QuizSignal::Reveal, QuizSignal::Close]);
    assert_eq!(engine.activate(&path("5")).await.unwrap(), Outcome::Done);

    assert_eq!(
        engine.host().calls(),
        vec![
            "show_quiz:unrevealed",
            "play_sound:tada.wav",
            "report_error:play_sound failed",
            "show_quiz:revealed"
        ]
    );
    let views = engine.host().quiz_views();
    let last = views.last().unwrap();
    assert!(last.is_revealed());
    assert!(last.answers.iter().all(|a| a.correct.is_some()));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_closed_without_reveal() {
    let mut engine = engine_with(TOUR);
    assert_eq!(engine.activate(&path("5")).await.unwrap(), Outcome::Done);
    assert_eq!(engine.host().calls(), vec!["show_quiz:unrevealed"]);
}
