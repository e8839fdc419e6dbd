#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::clipboard::{ClipboardSink, FallbackClipboard, OSC52_MAX_BYTES, Osc52Clipboard, osc52_sequence};
use super::editor::parse_line_editor_output;
use super::terminal::EditorCommand;
use super::view::{MessageLevel, Ui, UiAction};
use crate::config::KeyBindingsConfig;
use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{Terminal, backend::TestBackend};
use std::cell::RefCell;
use std::fmt::Display;
use std::io::Write;
use std::rc::Rc;
use std::result::Result as StdResult;
use std::time::Duration;
use tempfile::NamedTempFile;
use valentine_app::{
    AppConfig, ContentGenerator, MemoryPreferenceStore, PreferenceStore, ProposalPhase,
    TemplateGenerator, TimingConfig, ViewContainer,
};
use valentine_core::{DatePlan, LetterRequest, Location, ManualClock, PersistedPreferences, View};

type TestUi = Ui<Rc<MemoryPreferenceStore>, Rc<ManualClock>>;

fn expect_ok<T, E: Display>(result: StdResult<T, E>, ctx: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{ctx}: {err}"),
    }
}

fn expect_some<T>(value: Option<T>, ctx: &str) -> T {
    value.map_or_else(|| panic!("{ctx}"), |inner| inner)
}

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.copied.borrow_mut().push(text.to_owned());
        Ok(())
    }
}

struct BrokenClipboard;

impl ClipboardSink for BrokenClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Err(anyhow!("no display"))
    }
}

struct OfflineGenerator;

impl ContentGenerator for OfflineGenerator {
    fn generate_letter(&self, _request: &LetterRequest) -> Result<String> {
        Err(anyhow!("offline"))
    }

    fn generate_date_plan(&self, _preferences: &str) -> Result<DatePlan> {
        Err(anyhow!("offline"))
    }

    fn curate_memory(&self, _image_data_url: &str, _context: &str) -> Result<String> {
        Err(anyhow!("offline"))
    }
}

struct Harness {
    ui: TestUi,
    store: Rc<MemoryPreferenceStore>,
    clock: Rc<ManualClock>,
    copied: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    fn start(store: MemoryPreferenceStore, address: &str) -> Self {
        Self::with_generator(store, address, Box::new(TemplateGenerator))
    }

    fn with_generator(
        store: MemoryPreferenceStore,
        address: &str,
        generator: Box<dyn ContentGenerator>,
    ) -> Self {
        let store = Rc::new(store);
        let clock = Rc::new(ManualClock::new());
        let config = AppConfig {
            timing: TimingConfig {
                reveal_step_ms: 100,
                confirmation_ms: 400,
            },
            ..AppConfig::default()
        };
        let mut container = ViewContainer::new(Rc::clone(&store), Rc::clone(&clock), config);
        container.startup(Location::parse(address));
        let clipboard = RecordingClipboard::default();
        let copied = Rc::clone(&clipboard.copied);
        let ui = Ui::with_parts(
            container,
            generator,
            Box::new(ChaCha8Rng::seed_from_u64(42)),
            Box::new(clipboard),
            KeyBindingsConfig::default(),
        );
        Self {
            ui,
            store,
            clock,
            copied,
        }
    }

    fn press(&mut self, code: KeyCode) -> Option<UiAction> {
        self.ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn char(&mut self, c: char) -> Option<UiAction> {
        self.press(KeyCode::Char(c))
    }

    fn advance(&mut self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
        self.ui.tick();
    }

    fn reveal(&mut self) {
        for _ in 0..64 {
            if self
                .ui
                .container
                .proposal()
                .is_some_and(|p| p.sequencer().is_asking())
            {
                return;
            }
            self.advance(100);
        }
        panic!("the question was never asked");
    }

    fn message(&self) -> (MessageLevel, String) {
        let msg = expect_some(self.ui.message.as_ref(), "expected a status message");
        (msg.level, msg.text.clone())
    }

    fn view(&self) -> View {
        self.ui.container.view()
    }

    fn render(&self) -> String {
        self.render_at(100, 30)
    }

    fn render_at(&self, width: u16, height: u16) -> String {
        let mut terminal = expect_ok(Terminal::new(TestBackend::new(width, height)), "test terminal");
        expect_ok(terminal.draw(|f| self.ui.draw(f)), "draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn accepted_hub() -> Self {
        Self::start(
            MemoryPreferenceStore::with_entries([
                ("valentine_accepted", "true"),
                ("partner_name", "Jordan"),
            ]),
            "",
        )
    }
}

#[test]
fn yes_on_landing_walks_through_to_the_dashboard() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "");
    assert_eq!(h.view(), View::Landing);

    assert!(h.char('y').is_none());
    assert_eq!(h.view(), View::OfficialProposal);

    // Accepting before the question is asked does nothing.
    h.char('y');
    assert!(!h.store.get().accepted);

    h.reveal();
    h.press(KeyCode::Enter);
    assert!(h.store.get().accepted);
    assert_eq!(h.ui.container.proposal().map(|p| p.phase()), Some(ProposalPhase::Accepted));
    assert_eq!(h.view(), View::OfficialProposal);

    h.advance(399);
    assert_eq!(h.view(), View::OfficialProposal);
    h.advance(1);
    assert_eq!(h.view(), View::Dashboard);
    assert_eq!(h.message(), (MessageLevel::Info, "Midnight Romance".to_owned()));
}

#[test]
fn decline_moves_the_button_and_grows_accept() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "");
    h.char('n');
    h.char('N');
    let evasion = h.ui.container.evasion();
    assert_eq!(evasion.interactions(), 2);
    assert_eq!(evasion.decline_label(), "Nice Try!");
    assert!((evasion.accept_scale() - 1.2).abs() < 1e-9);
    assert_eq!(h.view(), View::Landing);
}

#[test]
fn invitation_address_captures_names_and_signs_the_question() {
    let mut h = Harness::start(
        MemoryPreferenceStore::new(),
        "?view=official&to=Jordan&from=Casey#official-proposal",
    );
    assert_eq!(h.view(), View::OfficialProposal);
    let prefs = h.store.get();
    assert_eq!(prefs.partner_name.as_deref(), Some("Jordan"));
    assert_eq!(prefs.sender_name.as_deref(), Some("Casey"));

    h.reveal();
    let screen = h.render();
    assert!(screen.contains("Will you be my Valentine?"));
    assert!(screen.contains("with all my heart, Casey"));
}

#[test]
fn share_panel_edits_names_and_copies_the_link() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "#official-proposal");
    h.reveal();

    // Share keys are inert while the panel is closed.
    assert!(h.char('t').is_none());

    h.char('s');
    assert!(h.ui.container.proposal().is_some_and(|p| p.is_share_open()));
    assert_eq!(h.char('t'), Some(UiAction::EditPartner));
    expect_ok(
        h.ui.apply_editor_output(UiAction::EditPartner, "# Who is the invitation for?\nJordan\n"),
        "partner",
    );
    assert_eq!(h.char('f'), Some(UiAction::EditSender));
    expect_ok(h.ui.apply_editor_output(UiAction::EditSender, "Casey"), "sender");

    h.char('c');
    let copied = h.copied.borrow();
    assert_eq!(copied.len(), 1);
    assert!(copied[0].contains("view=official&to=Jordan&from=Casey"));
    assert!(copied[0].ends_with("#official-proposal"));
    drop(copied);
    assert_eq!(h.message(), (MessageLevel::Info, "Link copied!".to_owned()));

    // Drafting a link never touches the stored names.
    assert_eq!(h.store.get().partner_name, None);

    h.press(KeyCode::Esc);
    assert!(!h.ui.container.proposal().is_some_and(|p| p.is_share_open()));
    assert_eq!(h.view(), View::OfficialProposal);
}

#[test]
fn share_panel_fits_very_wide_terminals() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "#official-proposal");
    h.reveal();
    h.char('s');
    assert!(h.render_at(1000, 30).contains("Create Your Own Link"));
}

#[test]
fn clipboard_failure_is_reported() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "#official-proposal");
    h.ui.clipboard = Box::new(BrokenClipboard);
    h.reveal();
    h.char('s');
    h.char('c');
    let (level, text) = h.message();
    assert_eq!(level, MessageLevel::Error);
    assert!(text.contains("no display"));
}

#[test]
fn dashboard_opens_tools_and_back_returns() {
    let mut h = Harness::accepted_hub();
    assert_eq!(h.view(), View::Dashboard);
    assert!(h.render().contains("Welcome, Jordan"));

    for (key, view) in [
        ('1', View::LetterStudio),
        ('m', View::MemoryCurator),
        ('3', View::DatePlanner),
        ('b', View::BouquetBuilder),
    ] {
        h.char(key);
        assert_eq!(h.view(), view);
        h.press(KeyCode::Esc);
        assert_eq!(h.view(), View::Dashboard);
    }
}

#[test]
fn reset_returns_to_landing_and_clears_store() {
    let mut h = Harness::accepted_hub();
    h.ui
        .handle_key(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT));
    assert_eq!(h.view(), View::Landing);
    assert_eq!(h.store.get(), PersistedPreferences::default());
    assert_eq!(h.message().0, MessageLevel::Info);
}

#[test]
fn letter_studio_writes_copies_and_shares() {
    let mut h = Harness::accepted_hub();
    h.char('l');

    h.char('g');
    assert_eq!(h.message().0, MessageLevel::Error);
    assert!(h.ui.tools.letter.letter.is_none());

    assert_eq!(h.char('n'), Some(UiAction::EditLetterName));
    expect_ok(h.ui.apply_editor_output(UiAction::EditLetterName, "Jordan"), "name");
    expect_ok(
        h.ui.apply_editor_output(UiAction::EditLetterMemories, "# memories\nour first dance\n"),
        "memories",
    );
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    let letter = expect_some(h.ui.tools.letter.letter.clone(), "letter written");
    assert!(letter.starts_with("My dearest Jordan,"));
    assert!(letter.contains("our first dance"));

    h.char('c');
    assert_eq!(h.copied.borrow().last(), Some(&letter));

    assert_eq!(h.char('w'), Some(UiAction::EditSharePhone));
    expect_ok(h.ui.apply_editor_output(UiAction::EditSharePhone, "+1 555 0100"), "phone");
    let shared = expect_some(h.copied.borrow().last().cloned(), "share link");
    assert!(shared.starts_with("https://wa.me/15550100?text="));
}

#[test]
fn leaving_a_tool_forgets_its_inputs() {
    let mut h = Harness::accepted_hub();
    h.char('l');
    expect_ok(h.ui.apply_editor_output(UiAction::EditLetterName, "Jordan"), "name");
    h.press(KeyCode::Esc);
    h.char('l');
    assert!(h.ui.tools.letter.request.name.is_empty());
}

#[test]
fn blank_editor_output_changes_nothing() {
    let mut h = Harness::accepted_hub();
    h.char('p');
    expect_ok(h.ui.apply_editor_output(UiAction::EditPlannerPreferences, "# prompt\n\n"), "blank");
    assert!(h.ui.tools.planner.preferences.is_empty());
    assert_eq!(h.message(), (MessageLevel::Info, "Nothing changed".to_owned()));
}

#[test]
fn planner_shows_the_generated_itinerary() {
    let mut h = Harness::accepted_hub();
    h.char('p');
    expect_ok(
        h.ui.apply_editor_output(UiAction::EditPlannerPreferences, "a quiet beach and some jazz"),
        "preferences",
    );
    h.char('g');
    let plan = expect_some(h.ui.tools.planner.plan.clone(), "plan");
    assert!(!plan.activities.is_empty());
    assert!(h.render().contains(&plan.title));
}

#[test]
fn generator_failure_keeps_view_and_store() {
    let mut h = Harness::with_generator(
        MemoryPreferenceStore::with_entries([("valentine_accepted", "true")]),
        "",
        Box::new(OfflineGenerator),
    );
    h.char('p');
    expect_ok(h.ui.apply_editor_output(UiAction::EditPlannerPreferences, "picnic"), "prefs");
    h.char('g');
    let (level, text) = h.message();
    assert_eq!(level, MessageLevel::Error);
    assert!(text.contains("offline"));
    assert!(h.ui.tools.planner.plan.is_none());
    assert_eq!(h.view(), View::DatePlanner);
    assert!(h.store.get().accepted);
}

#[test]
fn bouquet_caps_at_five_and_sends() {
    let mut h = Harness::accepted_hub();
    h.char('4');

    h.press(KeyCode::Enter);
    assert_eq!(h.message().0, MessageLevel::Error);

    for _ in 0..5 {
        h.char(' ');
        h.char('j');
    }
    assert_eq!(h.ui.tools.bouquet.bouquet.len(), 5);
    h.char(' ');
    assert_eq!(h.ui.tools.bouquet.bouquet.len(), 5);
    assert_eq!(h.message().0, MessageLevel::Error);

    // Cursor stays on the last row.
    h.char('j');
    assert_eq!(h.ui.tools.bouquet.cursor, 5);
    h.press(KeyCode::Up);
    assert_eq!(h.ui.tools.bouquet.cursor, 4);
    h.char(' ');
    assert_eq!(h.ui.tools.bouquet.bouquet.len(), 4);

    h.press(KeyCode::Enter);
    assert!(h.ui.tools.bouquet.bouquet.is_sent());
    assert!(h.render().contains("Sent with love"));
}

#[test]
fn memory_curator_captions_a_loaded_photo() {
    let mut h = Harness::accepted_hub();
    h.char('2');

    h.char('g');
    assert_eq!(h.message(), (MessageLevel::Error, "Choose a photo first".to_owned()));

    let mut photo = expect_ok(
        tempfile::Builder::new().suffix(".png").tempfile(),
        "temp photo",
    );
    photo.write_all(b"\x89PNG fake bytes").unwrap();
    let path = photo.path().display().to_string();

    assert_eq!(h.char('o'), Some(UiAction::ChooseMemoryPhoto));
    expect_ok(h.ui.apply_editor_output(UiAction::ChooseMemoryPhoto, &path), "photo");
    let image = expect_some(h.ui.tools.memories.image.clone(), "image");
    assert!(image.starts_with("data:image/png;base64,"));

    expect_ok(
        h.ui.apply_editor_output(UiAction::EditMemoryContext, "the lake at dawn"),
        "context",
    );
    h.char('g');
    let caption = expect_some(h.ui.tools.memories.caption.clone(), "caption");
    assert!(caption.contains("the lake at dawn"));
}

#[test]
fn unsupported_photo_is_an_error() {
    let mut h = Harness::accepted_hub();
    h.char('2');
    let file: NamedTempFile = expect_ok(
        tempfile::Builder::new().suffix(".txt").tempfile(),
        "temp file",
    );
    let path = file.path().display().to_string();
    assert!(h.ui.apply_editor_output(UiAction::ChooseMemoryPhoto, &path).is_err());
    assert!(h.ui.tools.memories.image.is_none());
}

#[test]
fn quit_key_sets_flag() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "");
    h.char('q');
    assert!(h.ui.should_quit);
}

#[test]
fn key_release_is_ignored() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "");
    let mut key = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;
    h.ui.handle_key(key);
    assert_eq!(h.view(), View::Landing);
}

#[test]
fn landing_renders_the_decline_label() {
    let mut h = Harness::start(MemoryPreferenceStore::new(), "");
    assert!(h.render().contains("[ Not Today ]"));
    h.char('n');
    assert!(h.render().contains("[ Nice Try! ]"));
}

#[test]
fn editor_template_prefills_current_value() {
    let mut h = Harness::accepted_hub();
    h.char('l');
    expect_ok(h.ui.apply_editor_output(UiAction::EditLetterName, "Jordan"), "name");
    let template = h.ui.editor_template(UiAction::EditLetterName);
    assert!(template.contains("Jordan"));
    assert_eq!(parse_line_editor_output(&template).as_deref(), Some("Jordan"));
}

#[test]
fn osc52_wraps_base64_payload() {
    assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
}

#[test]
fn fallback_clipboard_switches_to_osc52_after_a_failure() {
    let mut out = Vec::new();
    {
        let mut clipboard = FallbackClipboard::new(Some(BrokenClipboard), Osc52Clipboard::new(&mut out));
        expect_ok(clipboard.set_text("hi"), "first copy");
        expect_ok(clipboard.set_text("yo"), "second copy");
    }
    assert_eq!(out, b"\x1b]52;c;aGk=\x07\x1b]52;c;eW8=\x07");
}

#[test]
fn fallback_clipboard_prefers_a_working_primary() {
    let primary = RecordingClipboard::default();
    let copied = Rc::clone(&primary.copied);
    let mut out = Vec::new();
    {
        let mut clipboard = FallbackClipboard::new(Some(primary), Osc52Clipboard::new(&mut out));
        expect_ok(clipboard.set_text("link"), "copy");
    }
    assert_eq!(*copied.borrow(), vec!["link".to_owned()]);
    assert!(out.is_empty());
}

#[test]
fn osc52_refuses_oversized_text() {
    let mut out = Vec::new();
    let mut clipboard = Osc52Clipboard::new(&mut out);
    let letter = "x".repeat(OSC52_MAX_BYTES);
    assert!(clipboard.set_text(&letter).is_err());
    drop(clipboard);
    assert!(out.is_empty());
}

#[test]
fn editor_command_prefers_the_app_variable() {
    let lookup = |name: &str| match name {
        "VALENTINE_EDITOR" => Some("code --wait".to_owned()),
        "EDITOR" => Some("nano".to_owned()),
        _ => None,
    };
    let editor = expect_ok(EditorCommand::resolve(lookup), "resolve");
    assert_eq!(editor.program, "code");
    assert_eq!(editor.args, vec!["--wait".to_owned()]);
}

#[test]
fn editor_command_skips_blank_variables_and_defaults_to_vi() {
    let blank_visual = |name: &str| match name {
        "VALENTINE_EDITOR" => Some("   ".to_owned()),
        "VISUAL" => Some(String::new()),
        "EDITOR" => Some("nano -w".to_owned()),
        _ => None,
    };
    let editor = expect_ok(EditorCommand::resolve(blank_visual), "resolve");
    assert_eq!(editor.program, "nano");

    let editor = expect_ok(EditorCommand::resolve(|_| None), "resolve");
    assert_eq!(editor.program, "vi");
    assert!(editor.args.is_empty());
}

#[test]
fn editor_command_keeps_quoted_words_together() {
    let editor = expect_ok(
        EditorCommand::parse(r#""/opt/My Editor/bin/edit" -c 'set tw=72'"#),
        "parse",
    );
    assert_eq!(editor.program, "/opt/My Editor/bin/edit");
    assert_eq!(editor.args, vec!["-c".to_owned(), "set tw=72".to_owned()]);
    assert!(EditorCommand::parse("vim 'unterminated").is_err());
}

#[cfg(unix)]
#[test]
fn editor_returns_the_saved_draft() {
    let editor = EditorCommand {
        program: "sh".to_owned(),
        args: vec!["-c".to_owned(), r#"printf 'Jordan\n' >> "$0""#.to_owned()],
    };
    let text = expect_ok(editor.edit("# Who is the invitation for?\n"), "edit");
    assert_eq!(text, "# Who is the invitation for?\nJordan\n");
    assert_eq!(parse_line_editor_output(&text).as_deref(), Some("Jordan"));
}

#[cfg(unix)]
#[test]
fn failing_editor_is_an_error() {
    let editor = EditorCommand {
        program: "false".to_owned(),
        args: Vec::new(),
    };
    assert!(editor.edit("draft").is_err());
}
