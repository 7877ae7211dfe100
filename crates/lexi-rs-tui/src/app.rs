//! Application state and key handling for the Lexi TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lexi_rs_core::{EntryDraft, EntryId, SortKey, VocabularyList};
use log::debug;

/// Which surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Table navigation.
    Table,
    /// Typing into the search box.
    Search,
    /// Detail modal for the selected entry.
    Detail,
    /// Add-entry form.
    Form,
}

/// Follow-up work a key press asks the event loop to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
    Delete(EntryId),
    Submit,
}

/// Top-level application state for the TUI.
pub struct App {
    /// View-model holding the collection and view state.
    pub list: VocabularyList,
    pub mode: Mode,
    /// Add-entry form contents.
    pub draft: EntryDraft,
    /// Label for the active store, shown in the header.
    pub store_label: String,
    /// True while a remote list request is in flight.
    pub remote_pending: bool,
}

impl App {
    pub fn new(list: VocabularyList, store_label: impl Into<String>) -> Self {
        Self {
            list,
            mode: Mode::Table,
            draft: EntryDraft::new(),
            store_label: store_label.into(),
            remote_pending: false,
        }
    }

    /// Translate a key press into state changes and a follow-up action.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match self.mode {
            Mode::Table => self.handle_table_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Detail => self.handle_detail_key(key),
            Mode::Form => self.handle_form_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                Action::None
            }
            KeyCode::Char('w') => {
                self.list.toggle_sort(SortKey::Word);
                Action::None
            }
            KeyCode::Char('c') => {
                self.list.toggle_sort(SortKey::CreatedAt);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.select_previous();
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.select_next();
                Action::None
            }
            KeyCode::Enter => {
                if self.selected_row().is_some() {
                    self.mode = Mode::Detail;
                }
                Action::None
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') => {
                self.mode = Mode::Form;
                Action::None
            }
            KeyCode::Char('r') if !self.remote_pending => Action::Reload,
            _ => Action::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => {
                self.list.set_search_term("");
                self.mode = Mode::Table;
            }
            KeyCode::Enter => self.mode = Mode::Table,
            KeyCode::Up => self.list.select_previous(),
            KeyCode::Down => self.list.select_next(),
            KeyCode::Backspace => {
                let mut term = self.list.search_term().to_string();
                term.pop();
                self.list.set_search_term(term);
            }
            KeyCode::Char(ch) => {
                let mut term = self.list.search_term().to_string();
                term.push(ch);
                self.list.set_search_term(term);
            }
            _ => {}
        }
        Action::None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.mode = Mode::Table;
                Action::None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.mode = Mode::Table;
                self.delete_selected()
            }
            _ => Action::None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        if self.draft.submitting {
            return Action::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            self.draft.reset();
            return Action::None;
        }
        match key.code {
            KeyCode::Esc => self.mode = Mode::Table,
            KeyCode::Enter => return Action::Submit,
            KeyCode::Tab | KeyCode::Down => self.draft.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.draft.focus_previous(),
            KeyCode::Backspace => {
                self.draft.focused_mut().pop();
            }
            KeyCode::Char(ch) => self.draft.focused_mut().push(ch),
            _ => {}
        }
        Action::None
    }

    /// Only a selection the user can see is deleted.
    fn delete_selected(&self) -> Action {
        let Some(id) = self.list.selected_id() else {
            return Action::None;
        };
        if self.selected_row().is_none() {
            debug!("delete ignored, selection is filtered out (id={id})");
            return Action::None;
        }
        debug!("delete requested (id={id})");
        Action::Delete(id.clone())
    }

    /// Index of the selection within the current projection.
    pub fn selected_row(&self) -> Option<usize> {
        let id = self.list.selected_id()?;
        self.list
            .projection()
            .iter()
            .position(|entry| &entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, App, Mode};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use lexi_rs_core::{
        DraftField, EntryId, ListOptions, SortDirection, SortKey, VocabularyList,
    };
    use lexi_rs_test_utils::{StubStore, entry};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn press(app: &mut App, code: KeyCode) -> Action {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    async fn loaded_app() -> App {
        let store = Arc::new(StubStore::with_entries(vec![
            entry("1", "brisk", 30),
            entry("2", "amble", 20),
            entry("3", "canter", 10),
        ]));
        let mut list = VocabularyList::new(store, None, ListOptions::default());
        list.load().await;
        App::new(list, "stub")
    }

    #[tokio::test]
    async fn search_mode_edits_the_term() {
        let mut app = loaded_app().await;
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);

        type_text(&mut app, "amx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.list.search_term(), "am");
        assert_eq!(app.list.projection().len(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Table);
        assert_eq!(app.list.search_term(), "am");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.list.search_term(), "");
    }

    #[tokio::test]
    async fn sort_keys_toggle_direction() {
        let mut app = loaded_app().await;
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.list.sort(), (SortKey::Word, SortDirection::Asc));
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.list.sort(), (SortKey::Word, SortDirection::Desc));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.list.sort(), (SortKey::CreatedAt, SortDirection::Asc));
    }

    #[tokio::test]
    async fn enter_opens_detail_and_delete_closes_it() {
        let mut app = loaded_app().await;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Table);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_row(), Some(1));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Detail);

        let action = press(&mut app, KeyCode::Char('d'));
        assert_eq!(action, Action::Delete(EntryId::new("2")));
        assert_eq!(app.mode, Mode::Table);
    }

    #[tokio::test]
    async fn selection_hidden_by_search_cannot_be_opened_or_deleted() {
        let mut app = loaded_app().await;
        press(&mut app, KeyCode::Down);
        assert_eq!(app.list.selected_id(), Some(&EntryId::new("1")));

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "amble");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Table);
        assert_eq!(app.selected_row(), None);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Table);
        assert_eq!(press(&mut app, KeyCode::Char('d')), Action::None);
        assert_eq!(press(&mut app, KeyCode::Delete), Action::None);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_row(), Some(0));
        assert_eq!(
            press(&mut app, KeyCode::Char('d')),
            Action::Delete(EntryId::new("2"))
        );
    }

    #[tokio::test]
    async fn form_routes_typing_to_the_focused_field() {
        let mut app = loaded_app().await;
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Form);

        type_text(&mut app, "gallop");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "run fast");
        assert_eq!(app.draft.field(DraftField::Word), "gallop");
        assert_eq!(app.draft.field(DraftField::MeaningEnglish), "run fast");

        assert_eq!(press(&mut app, KeyCode::Enter), Action::Submit);

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.draft.word, "");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Table);
    }

    #[tokio::test]
    async fn quit_and_reload_keys() {
        let mut app = loaded_app().await;
        assert_eq!(press(&mut app, KeyCode::Char('r')), Action::Reload);
        app.remote_pending = true;
        assert_eq!(press(&mut app, KeyCode::Char('r')), Action::None);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
    }
}
