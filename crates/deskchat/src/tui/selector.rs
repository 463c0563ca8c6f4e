//! Autocomplete popup for slash commands and workspace paths.
//!
//! The selector reads the query after the leading `/` and switches
//! between picking a command, picking a sub-command, and browsing a
//! directory on the host. It never edits the input field itself; every
//! rewrite goes through [`InputActions`].
//!
//! Directory listings run on a worker thread. Each `filter` call takes a
//! new request id and replies carrying an older id are discarded, so
//! only the most recent query can populate the list.

use std::sync::mpsc;
use std::sync::{Arc, LazyLock};
use std::thread;

use deskchat_core::path;
use deskchat_host::tools::ATTACH_TOOL_NAME;
use deskchat_host::{FileEntry, HostBridge, HostError};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use regex::Regex;

/// Row shown when a directory listing fails.
pub const LOAD_ERROR_LABEL: &str = "Erro ao carregar...";

/// Row shown when nothing matches.
pub const NO_RESULTS_LABEL: &str = "No results";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static REDUNDANT_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\./|/{2,}").expect("Invalid slash regex"));

/// Sub-commands accepted as the second word of a command.
pub fn sub_commands(command: &str) -> &'static [&'static str] {
    match command {
        ATTACH_TOOL_NAME => &["add", "delete"],
        _ => &[],
    }
}

/// Text-field capability handed to the selector.
pub trait InputActions {
    /// Replace the field text and re-run input handling.
    fn update_input(&mut self, new_text: String);

    /// Current field text.
    fn current_input(&self) -> String;
}

/// What the popup is currently offering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectorMode {
    /// Top-level command names.
    #[default]
    Commands,
    /// Sub-commands of `command`.
    SubCommands { command: String },
    /// Entries of `base_path` for `command`.
    Paths {
        command: String,
        sub_command: Option<String>,
        base_path: String,
    },
}

impl SelectorMode {
    /// Directory being browsed; `.` outside path mode.
    pub fn base_path(&self) -> &str {
        match self {
            SelectorMode::Paths { base_path, .. } => base_path,
            _ => ".",
        }
    }
}

struct ListingReply {
    request_id: u64,
    base_path: String,
    result: Result<Vec<FileEntry>, HostError>,
}

/// State machine and view of the autocomplete popup.
pub struct CommandSelector {
    host: Arc<dyn HostBridge>,
    commands: Vec<String>,
    visible: bool,
    mode: SelectorMode,
    items: Vec<String>,
    selected: Option<usize>,
    load_error: bool,
    request_id: u64,
    listing_tx: mpsc::Sender<ListingReply>,
    listing_rx: mpsc::Receiver<ListingReply>,
    list_state: ListState,
    /// Inner area of the last render, for mouse hit testing.
    rows_area: Option<Rect>,
}

impl CommandSelector {
    /// Create a hidden selector with the given catalog.
    pub fn new(host: Arc<dyn HostBridge>, commands: Vec<String>) -> Self {
        let (listing_tx, listing_rx) = mpsc::channel();
        Self {
            host,
            commands,
            visible: false,
            mode: SelectorMode::Commands,
            items: Vec::new(),
            selected: None,
            load_error: false,
            request_id: 0,
            listing_tx,
            listing_rx,
            list_state: ListState::default(),
            rows_area: None,
        }
    }

    /// Replace the command catalog.
    pub fn set_commands(&mut self, commands: Vec<String>) {
        self.commands = commands;
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the popup and forget the active command.
    ///
    /// Any listing still in flight is superseded.
    pub fn hide(&mut self) {
        self.visible = false;
        self.mode = SelectorMode::Commands;
        self.items.clear();
        self.selected = None;
        self.load_error = false;
        self.request_id += 1;
        self.list_state = ListState::default();
        self.rows_area = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True once a command has been locked in.
    pub fn has_sub_items(&self) -> bool {
        !matches!(self.mode, SelectorMode::Commands)
    }

    pub fn has_selection(&self) -> bool {
        !self.items.is_empty() && self.selected.is_some()
    }

    pub fn mode(&self) -> &SelectorMode {
        &self.mode
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the list holds the load error row.
    pub fn load_failed(&self) -> bool {
        self.load_error
    }

    /// Recompute mode and items for the text after the leading `/`.
    pub fn filter(&mut self, query: &str) {
        self.request_id += 1;

        if query.is_empty() && self.mode == SelectorMode::Commands {
            self.set_items(self.commands.clone());
            return;
        }

        let parts: Vec<&str> = query.split(' ').collect();
        let head = parts[0];
        let sub = parts.get(1).copied().unwrap_or("");
        let subs = sub_commands(head);

        if !subs.is_empty() && !subs.contains(&sub) {
            self.mode = SelectorMode::SubCommands {
                command: head.to_string(),
            };
            let items = subs
                .iter()
                .filter(|s| s.starts_with(sub))
                .map(|s| s.to_string())
                .collect();
            self.set_items(items);
            return;
        }

        if self.commands.iter().any(|c| c == head) {
            let skip = if subs.is_empty() { 1 } else { 2 };
            let path_query = parts.get(skip..).unwrap_or(&[]).join(" ");
            let segments: Vec<&str> = path_query.split('/').collect();
            let base = segments[..segments.len() - 1].join("/");
            let base_path = if base.is_empty() { ".".to_string() } else { base };

            self.mode = SelectorMode::Paths {
                command: head.to_string(),
                sub_command: (!subs.is_empty()).then(|| sub.to_string()),
                base_path: base_path.clone(),
            };
            self.request_listing(base_path);
            return;
        }

        if self.mode != SelectorMode::Commands {
            tracing::trace!(query = %query, "No command matches, keeping current list");
            return;
        }
        let items = self
            .commands
            .iter()
            .filter(|c| c.starts_with(query))
            .cloned()
            .collect();
        self.set_items(items);
    }

    fn request_listing(&self, base_path: String) {
        let request_id = self.request_id;
        let host = Arc::clone(&self.host);
        let tx = self.listing_tx.clone();
        tracing::debug!(request_id, path = %base_path, "Requesting directory listing");

        thread::spawn(move || {
            let result = host.list_directory(&base_path);
            let _ = tx.send(ListingReply {
                request_id,
                base_path,
                result,
            });
        });
    }

    /// Apply finished listings. Returns true when the items changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(reply) = self.listing_rx.try_recv() {
            changed |= self.apply_listing(reply);
        }
        changed
    }

    fn apply_listing(&mut self, reply: ListingReply) -> bool {
        if reply.request_id != self.request_id {
            tracing::debug!(
                request_id = reply.request_id,
                latest = self.request_id,
                "Dropping stale directory listing"
            );
            return false;
        }

        match reply.result {
            Ok(entries) => {
                self.set_items(entries.iter().map(FileEntry::display_name).collect());
            }
            Err(e) => {
                tracing::warn!(path = %reply.base_path, error = %e, "Failed to list directory");
                self.items = vec![LOAD_ERROR_LABEL.to_string()];
                self.selected = None;
                self.load_error = true;
                self.list_state = ListState::default();
            }
        }
        true
    }

    fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.load_error = false;
        self.selected = if self.items.is_empty() { None } else { Some(0) };
        self.list_state = ListState::default().with_selected(self.selected);
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            if i + 1 < self.items.len() {
                self.selected = Some(i + 1);
                self.list_state.select(self.selected);
            }
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected {
            if i > 0 {
                self.selected = Some(i - 1);
                self.list_state.select(self.selected);
            }
        }
    }

    fn selected_item(&self) -> Option<&str> {
        if self.load_error {
            return None;
        }
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Rewrite the input to reflect the selected item.
    pub fn confirm_selection(&mut self, actions: &mut dyn InputActions) {
        let Some(item) = self.selected_item().map(str::to_string) else {
            return;
        };

        match self.mode.clone() {
            SelectorMode::Commands => actions.update_input(format!("/{} ", item)),
            SelectorMode::SubCommands { command } => {
                if sub_commands(&command).contains(&item.as_str()) {
                    actions.update_input(format!("/{} {} ", command, item));
                }
            }
            SelectorMode::Paths {
                command,
                sub_command,
                base_path,
            } => {
                let base = command_prefix(&command, sub_command.as_deref(), &*actions);
                if item.ends_with('/') {
                    let raw = format!("{} {}/{}", base, base_path, item);
                    actions.update_input(normalize_rewrite(&raw));
                } else {
                    let final_path = path::join([base_path.as_str(), item.as_str()]);
                    actions.update_input(format!("{} {}", base, final_path));
                    self.hide();
                }
            }
        }
    }

    /// Select `row` and confirm it, as a mouse click does.
    pub fn click(&mut self, row: usize, actions: &mut dyn InputActions) {
        if self.load_error || row >= self.items.len() {
            return;
        }
        self.selected = Some(row);
        self.list_state.select(self.selected);
        self.confirm_selection(actions);
    }

    /// Map a screen position to an item index from the last render.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.rows_area?;
        if self.load_error
            || column < area.x
            || column >= area.right()
            || row < area.y
            || row >= area.bottom()
        {
            return None;
        }
        let index = self.list_state.offset() + (row - area.y) as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Height the popup wants, borders included.
    pub fn popup_height(&self, max_rows: u16) -> u16 {
        let rows = self.items.len().max(1).min(max_rows as usize) as u16;
        rows + 2
    }

    /// Draw the popup into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match &self.mode {
            SelectorMode::Commands => " Commands ".to_string(),
            SelectorMode::SubCommands { command } => format!(" /{} ", command),
            SelectorMode::Paths { base_path, .. } => format!(" {} ", base_path),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);
        self.rows_area = Some(block.inner(area));

        frame.render_widget(Clear, area);

        if self.items.is_empty() || self.load_error {
            let label = if self.load_error {
                LOAD_ERROR_LABEL
            } else {
                NO_RESULTS_LABEL
            };
            let row = Paragraph::new(label)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(row, area);
            return;
        }

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(item.as_str()))
            .collect();
        let list = List::new(rows)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

/// `/command` plus the sub-command word for commands that take one.
///
/// The sub-command comes from the mode, falling back to the second word
/// of the field.
fn command_prefix(command: &str, sub_command: Option<&str>, actions: &dyn InputActions) -> String {
    let mut base = format!("/{}", command);
    if sub_commands(command).is_empty() {
        return base;
    }

    let sub = match sub_command.filter(|s| !s.is_empty()) {
        Some(sub) => sub.to_string(),
        None => actions
            .current_input()
            .split(' ')
            .nth(1)
            .unwrap_or_default()
            .to_string(),
    };
    if !sub.is_empty() {
        base.push(' ');
        base.push_str(&sub);
    }
    base
}

/// Collapse whitespace runs, and `./` or repeated slashes, to one character.
fn normalize_rewrite(text: &str) -> String {
    let spaced = WHITESPACE_RUN.replace_all(text, " ");
    REDUNDANT_SLASH.replace_all(&spaced, "/").into_owned()
}

#[cfg(test)]
impl CommandSelector {
    /// Block until a current listing reply is applied, skipping stale ones.
    pub(crate) fn wait_for_listing(&mut self, timeout: std::time::Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while let Some(left) = deadline.checked_duration_since(std::time::Instant::now()) {
            match self.listing_rx.recv_timeout(left) {
                Ok(reply) => {
                    if self.apply_listing(reply) {
                        return true;
                    }
                }
                Err(_) => return false,
            }
        }
        false
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};

    use super::test_support::MockHost;
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);
    const SHORT_WAIT: Duration = Duration::from_millis(300);

    #[derive(Default)]
    struct Field {
        text: String,
        updates: Vec<String>,
    }

    impl InputActions for Field {
        fn update_input(&mut self, new_text: String) {
            self.text = new_text.clone();
            self.updates.push(new_text);
        }

        fn current_input(&self) -> String {
            self.text.clone()
        }
    }

    fn catalog() -> Vec<String> {
        vec!["attach".into(), "currentfile".into(), "help".into()]
    }

    fn selector(host: MockHost) -> CommandSelector {
        let mut selector = CommandSelector::new(Arc::new(host), catalog());
        selector.show();
        selector
    }

    fn src_listing() -> Vec<FileEntry> {
        vec![FileEntry::dir("app"), FileEntry::file("main.ts")]
    }

    #[test]
    fn test_empty_query_lists_catalog() {
        let mut s = selector(MockHost::default());
        s.filter("");
        assert!(s.is_visible());
        assert_eq!(s.items(), catalog().as_slice());
        assert_eq!(s.selected(), Some(0));
        assert!(!s.has_sub_items());
    }

    #[test]
    fn test_prefix_filter_keeps_catalog_order() {
        let mut s = selector(MockHost::default());
        s.set_commands(vec!["cd".into(), "attach".into(), "currentfile".into(), "Cat".into()]);
        s.filter("c");
        assert_eq!(s.items(), ["cd", "currentfile"]);
        assert_eq!(s.selected(), Some(0));
        assert_eq!(s.mode(), &SelectorMode::Commands);
    }

    #[test]
    fn test_no_matches_has_no_selection() {
        let mut s = selector(MockHost::default());
        s.filter("zzz");
        assert!(s.items().is_empty());
        assert_eq!(s.selected(), None);
        assert!(!s.has_selection());

        let mut field = Field::default();
        s.confirm_selection(&mut field);
        assert!(field.updates.is_empty());
    }

    #[test]
    fn test_confirm_command() {
        let mut s = selector(MockHost::default());
        let mut field = Field::default();
        s.filter("c");
        s.confirm_selection(&mut field);
        assert_eq!(field.text, "/currentfile ");
    }

    #[test]
    fn test_every_command_round_trips() {
        for (index, command) in catalog().iter().enumerate() {
            let mut s = selector(MockHost::default());
            let mut field = Field::default();
            s.filter("");
            for _ in 0..index {
                s.select_next();
            }
            s.confirm_selection(&mut field);
            assert_eq!(field.text, format!("/{} ", command));
        }
    }

    #[test]
    fn test_attach_offers_sub_commands() {
        let mut s = selector(MockHost::default());
        let mut field = Field::default();

        s.filter("attach ");
        assert_eq!(
            s.mode(),
            &SelectorMode::SubCommands {
                command: "attach".into()
            }
        );
        assert_eq!(s.items(), ["add", "delete"]);
        assert!(s.has_sub_items());

        s.filter("attach d");
        assert_eq!(s.items(), ["delete"]);

        s.filter("attach a");
        s.confirm_selection(&mut field);
        assert_eq!(field.text, "/attach add ");
    }

    #[test]
    fn test_attach_without_space_switches_to_sub_commands() {
        let mut s = selector(MockHost::default());
        s.filter("attach");
        assert_eq!(s.items(), ["add", "delete"]);
    }

    #[test]
    fn test_path_listing_for_attach() {
        let host = MockHost::default().with_listing("src", src_listing());
        let mut s = selector(host);

        s.filter("attach add src/");
        assert_eq!(
            s.mode(),
            &SelectorMode::Paths {
                command: "attach".into(),
                sub_command: Some("add".into()),
                base_path: "src".into(),
            }
        );
        assert!(s.wait_for_listing(WAIT));
        assert_eq!(s.items(), ["app/", "main.ts"]);
        assert_eq!(s.selected(), Some(0));
        assert_eq!(s.mode().base_path(), "src");
    }

    #[test]
    fn test_locked_command_lists_root_for_empty_path() {
        let host = MockHost::default().with_listing(".", vec![FileEntry::file("Cargo.toml")]);
        let mut s = selector(host);

        s.filter("currentfile ");
        assert_eq!(s.mode().base_path(), ".");
        assert!(s.wait_for_listing(WAIT));
        assert_eq!(s.items(), ["Cargo.toml"]);
    }

    #[test]
    fn test_confirm_directory_keeps_popup_open() {
        let host = MockHost::default().with_listing("src", src_listing());
        let mut s = selector(host);
        let mut field = Field {
            text: "/attach add src/".into(),
            ..Default::default()
        };

        s.filter("attach add src/");
        assert!(s.wait_for_listing(WAIT));
        s.confirm_selection(&mut field);

        assert_eq!(field.text, "/attach add src/app/");
        assert!(s.is_visible());
    }

    #[test]
    fn test_confirm_file_hides_popup() {
        let host = MockHost::default().with_listing("src", src_listing());
        let mut s = selector(host);
        let mut field = Field {
            text: "/attach add src/".into(),
            ..Default::default()
        };

        s.filter("attach add src/");
        assert!(s.wait_for_listing(WAIT));
        s.select_next();
        s.confirm_selection(&mut field);

        assert_eq!(field.text, "/attach add src/main.ts");
        assert!(!s.is_visible());
        assert_eq!(s.mode(), &SelectorMode::Commands);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_click_confirms_row() {
        let host = MockHost::default().with_listing("src", src_listing());
        let mut s = selector(host);
        let mut field = Field {
            text: "/attach add src/".into(),
            ..Default::default()
        };

        s.filter("attach add src/");
        assert!(s.wait_for_listing(WAIT));
        s.click(5, &mut field);
        assert!(field.updates.is_empty());
        assert_eq!(s.selected(), Some(0));

        s.click(1, &mut field);
        assert_eq!(field.text, "/attach add src/main.ts");
        assert!(!s.is_visible());
    }

    #[test]
    fn test_row_at_follows_rendered_rows() {
        let mut s = selector(MockHost::default());
        s.filter("");
        assert_eq!(s.row_at(1, 3), None);

        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|f| s.render(f, Rect::new(0, 2, 20, 5)))
            .unwrap();

        assert_eq!(s.row_at(1, 3), Some(0));
        assert_eq!(s.row_at(5, 5), Some(2));
        assert_eq!(s.row_at(0, 3), None);
        assert_eq!(s.row_at(1, 2), None);
        assert_eq!(s.row_at(19, 3), None);
        assert_eq!(s.row_at(1, 6), None);
    }

    #[test]
    fn test_directory_rewrite_from_root_is_normalized() {
        let host = MockHost::default().with_listing(".", vec![FileEntry::dir("docs")]);
        let mut s = selector(host);
        let mut field = Field::default();

        s.filter("currentfile ");
        assert!(s.wait_for_listing(WAIT));
        s.confirm_selection(&mut field);

        assert_eq!(field.text, "/currentfile /docs/");
    }

    #[test]
    fn test_file_rewrite_joins_parent_segments() {
        let host = MockHost::default().with_listing("./x/..", vec![FileEntry::file("z")]);
        let mut s = selector(host);
        s.set_commands(vec!["open".into()]);
        let mut field = Field::default();

        s.filter("open ./x/../y");
        assert_eq!(s.mode().base_path(), "./x/..");
        assert!(s.wait_for_listing(WAIT));
        s.confirm_selection(&mut field);

        assert_eq!(field.text, "/open z");
        assert!(!s.is_visible());
    }

    #[test]
    fn test_listing_failure_shows_placeholder() {
        let mut s = selector(MockHost::default());
        let mut field = Field::default();

        s.filter("currentfile missing/");
        assert!(s.wait_for_listing(WAIT));

        assert_eq!(s.items(), [LOAD_ERROR_LABEL]);
        assert_eq!(s.selected(), None);
        assert!(!s.has_selection());
        assert!(s.load_failed());
        assert!(s.is_visible());

        s.select_next();
        assert_eq!(s.selected(), None);
        s.confirm_selection(&mut field);
        s.click(0, &mut field);
        assert!(field.updates.is_empty());
    }

    #[test]
    fn test_stale_listing_is_dropped() {
        let host = MockHost::default()
            .with_listing("slow", vec![FileEntry::file("old.txt")])
            .with_listing("fast", vec![FileEntry::file("new.txt")]);
        let release = host.gate("slow");
        let mut s = selector(host);

        s.filter("currentfile slow/");
        s.filter("currentfile fast/");
        assert!(s.wait_for_listing(WAIT));
        assert_eq!(s.items(), ["new.txt"]);

        release.send(()).unwrap();
        assert!(!s.wait_for_listing(SHORT_WAIT));
        assert_eq!(s.items(), ["new.txt"]);
        assert_eq!(s.mode().base_path(), "fast");
    }

    #[test]
    fn test_listing_after_hide_is_dropped() {
        let host = MockHost::default().with_listing("src", src_listing());
        let release = host.gate("src");
        let mut s = selector(host);

        s.filter("currentfile src/");
        s.hide();
        release.send(()).unwrap();
        assert!(!s.wait_for_listing(SHORT_WAIT));
        assert!(s.items().is_empty());
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut s = selector(MockHost::default());
        s.filter("");
        s.select_previous();
        assert_eq!(s.selected(), Some(0));
        s.select_next();
        s.select_next();
        s.select_next();
        s.select_next();
        assert_eq!(s.selected(), Some(2));
        s.select_previous();
        assert_eq!(s.selected(), Some(1));
    }

    #[test]
    fn test_hide_resets_state() {
        let mut s = selector(MockHost::default());
        s.filter("attach ");
        s.hide();
        assert!(!s.is_visible());
        assert_eq!(s.mode(), &SelectorMode::Commands);
        assert_eq!(s.mode().base_path(), ".");
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_set_commands_keeps_selection_and_visibility() {
        let mut s = selector(MockHost::default());
        s.filter("");
        s.select_next();
        s.set_commands(vec!["x".into()]);
        assert!(s.is_visible());
        assert_eq!(s.selected(), Some(1));
        assert_eq!(s.commands(), ["x"]);
    }

    #[test]
    fn test_erasing_command_keeps_locked_mode() {
        let mut s = selector(MockHost::default());
        s.filter("attach ");
        s.filter("att");
        assert_eq!(
            s.mode(),
            &SelectorMode::SubCommands {
                command: "attach".into()
            }
        );
        assert_eq!(s.items(), ["add", "delete"]);
        assert_eq!(s.selected(), Some(0));

        s.filter("");
        assert!(s.has_sub_items());
        assert_eq!(s.items(), ["add", "delete"]);

        s.hide();
        s.show();
        s.filter("");
        assert_eq!(s.items(), catalog().as_slice());
    }

    #[test]
    fn test_sub_command_falls_back_to_field_text() {
        let mut field = Field {
            text: "/attach delete ".into(),
            ..Default::default()
        };
        assert_eq!(command_prefix("attach", None, &field), "/attach delete");
        assert_eq!(command_prefix("attach", Some("add"), &field), "/attach add");
        assert_eq!(command_prefix("currentfile", None, &field), "/currentfile");
        field.text = "/attach".into();
        assert_eq!(command_prefix("attach", None, &field), "/attach");
    }

    #[test]
    fn test_normalize_rewrite() {
        assert_eq!(normalize_rewrite("/attach  add ./src//app/"), "/attach add /src/app/");
        assert_eq!(normalize_rewrite("/open a/b/"), "/open a/b/");
    }

    #[test]
    fn test_popup_height() {
        let mut s = selector(MockHost::default());
        s.filter("zzz");
        assert_eq!(s.popup_height(8), 3);
        s.filter("");
        assert_eq!(s.popup_height(8), 5);
        assert_eq!(s.popup_height(2), 4);
    }
}
