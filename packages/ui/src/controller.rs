//! # Directory controller — client state as snapshots
//!
//! [`DirectoryState`] is one immutable snapshot of everything the contacts
//! screen shows: the last fetched list, the search query, the add/edit form and
//! the two error slots (the inline email error and the banner). Every user
//! action is a pure method that consumes a snapshot and returns the next one.
//!
//! The async protocols ([`refresh`], [`submit`], [`delete`]) read the snapshot
//! they start from but never hand back a whole new one. They return a
//! [`Landed`] outcome, applied with [`DirectoryState::land`] to whatever the
//! state is once the request finishes, so a query typed or a form closed in
//! the meantime survives.
//!
//! ## Form states
//!
//! ```text
//! Idle --open_add--> Adding          Adding|Editing --cancel--> Idle
//! Idle --open_edit(c)--> Editing(c)  Adding|Editing --submit ok--> Idle
//! Editing --delete ok--> Idle        submit rejected: stay, show error
//! ```
//!
//! ## Submit protocol
//!
//! 1. Validate the draft locally; schema errors stay in the form.
//! 2. Ask [`ContactApi::check_email`] (excluding the edited contact's own id).
//!    A taken email stops here with a field error; the write is never sent.
//!    If the check itself fails the write goes ahead, the store still guards
//!    uniqueness.
//! 3. Create or update. A duplicate rejection from the write (another session
//!    claimed the email in between) lands in the same field error.
//! 4. On success close the form and re-fetch the whole list.
//!
//! A rejection that arrives after the form was closed keeps only its banner
//! message; an email error has nowhere to go and is dropped.
//!
//! A failed fetch keeps the previous list on screen and only raises the banner.

use api::{ContactApi, ContactDraft, ContactError};
use store::{Contact, ContactId};

pub const FETCH_FAILED: &str = "Failed to fetch contacts";
pub const DELETE_FAILED: &str = "Failed to delete contact";
pub const NO_MATCHES: &str = "No contacts found matching your search.";
pub const NO_CONTACTS: &str = "No contacts yet. Click the Add Contact button to get started!";

/// The add/edit surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Form {
    #[default]
    Idle,
    Adding { draft: ContactDraft },
    Editing { contact: Contact, draft: ContactDraft },
}

impl Form {
    pub fn is_open(&self) -> bool {
        !matches!(self, Form::Idle)
    }

    pub fn draft(&self) -> Option<&ContactDraft> {
        match self {
            Form::Idle => None,
            Form::Adding { draft } | Form::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut ContactDraft> {
        match self {
            Form::Idle => None,
            Form::Adding { draft } | Form::Editing { draft, .. } => Some(draft),
        }
    }

    /// Id of the contact being edited.
    pub fn editing_id(&self) -> Option<ContactId> {
        match self {
            Form::Editing { contact, .. } => Some(contact.id),
            _ => None,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Form::Editing { .. } => "edit",
            _ => "add",
        }
    }
}

/// Everything the contacts screen renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectoryState {
    /// Last successfully fetched list, in server order.
    pub contacts: Vec<Contact>,
    pub query: String,
    pub form: Form,
    /// Inline error under the email input.
    pub email_error: Option<String>,
    /// Banner error above the list.
    pub error: Option<String>,
}

impl DirectoryState {
    pub fn open_add(self) -> Self {
        if self.form.is_open() {
            return self;
        }
        Self {
            form: Form::Adding {
                draft: ContactDraft::default(),
            },
            email_error: None,
            error: None,
            ..self
        }
    }

    pub fn open_edit(self, contact: Contact) -> Self {
        if self.form.is_open() {
            return self;
        }
        let draft = ContactDraft::from(&contact);
        Self {
            form: Form::Editing { contact, draft },
            email_error: None,
            error: None,
            ..self
        }
    }

    /// Close the form, discarding the draft.
    pub fn cancel(self) -> Self {
        Self {
            form: Form::Idle,
            email_error: None,
            ..self
        }
    }

    pub fn set_name(mut self, name: String) -> Self {
        if let Some(draft) = self.form.draft_mut() {
            draft.name = name;
            self.error = None;
        }
        self
    }

    pub fn set_email(mut self, email: String) -> Self {
        if let Some(draft) = self.form.draft_mut() {
            draft.email = email;
            self.email_error = None;
            self.error = None;
        }
        self
    }

    pub fn set_query(self, query: String) -> Self {
        Self { query, ..self }
    }

    pub fn clear_query(self) -> Self {
        self.set_query(String::new())
    }

    /// Replace the cached list with a fresh fetch.
    pub fn loaded(self, contacts: Vec<Contact>) -> Self {
        Self { contacts, ..self }
    }

    /// Keep the stale list, raise the banner.
    pub fn load_failed(self) -> Self {
        Self {
            error: Some(FETCH_FAILED.to_string()),
            ..self
        }
    }

    /// Apply the outcome of a list request.
    pub fn fetched(self, result: Result<Vec<Contact>, ContactError>) -> Self {
        match result {
            Ok(contacts) => self.loaded(contacts),
            Err(_) => self.load_failed(),
        }
    }

    /// Apply a finished request to the current snapshot.
    pub fn land(self, landed: Landed) -> Self {
        match landed {
            Landed::Unchanged => self,
            Landed::Fetched(result) => self.fetched(result),
            Landed::Done(result) => Self {
                error: None,
                ..self.cancel()
            }
            .fetched(result),
            Landed::EmailError(_) if !self.form.is_open() => self,
            Landed::EmailError(message) => Self {
                email_error: Some(message),
                error: None,
                ..self
            },
            Landed::Banner(message) => Self {
                email_error: None,
                error: Some(message),
                ..self
            },
        }
    }

    /// Contacts matching the current query.
    pub fn visible(&self) -> Vec<&Contact> {
        filter_contacts(&self.contacts, &self.query)
    }

    /// Placeholder text when nothing is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.visible().is_empty() {
            None
        } else if self.query.is_empty() {
            Some(NO_CONTACTS)
        } else {
            Some(NO_MATCHES)
        }
    }
}

/// What a finished request does to the directory state.
#[derive(Clone, Debug, PartialEq)]
pub enum Landed {
    Unchanged,
    /// A list request finished.
    Fetched(Result<Vec<Contact>, ContactError>),
    /// A write or delete went through; close the form and show the refetched list.
    Done(Result<Vec<Contact>, ContactError>),
    /// Rejected because of the email; the form stays open.
    EmailError(String),
    /// Rejected for any other reason.
    Banner(String),
}

impl Landed {
    /// A write from `form` was refused.
    fn rejected(form: &Form, err: ContactError) -> Self {
        if err.is_email_error() {
            return Landed::EmailError(err.to_string());
        }
        match err {
            ContactError::NotFound => Landed::Banner(err.to_string()),
            ContactError::Invalid { reason, .. } => Landed::Banner(reason),
            _ => {
                tracing::error!(error = %err, "error {}ing contact", form.verb());
                Landed::Banner(format!("Failed to {} contact", form.verb()))
            }
        }
    }
}

/// Case-insensitive substring match on name or email.
pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || (!c.email.is_empty() && c.email.to_lowercase().contains(&needle))
        })
        .collect()
}

async fn list<A: ContactApi>(api: &A) -> Result<Vec<Contact>, ContactError> {
    let result = api.list().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "error fetching contacts");
    }
    result
}

/// Re-fetch the list from the server.
pub async fn refresh<A: ContactApi>(api: &A) -> Landed {
    Landed::Fetched(list(api).await)
}

/// Run the submit protocol for the form open in `state`.
pub async fn submit<A: ContactApi>(api: &A, state: &DirectoryState) -> Landed {
    let Some(draft) = state.form.draft() else {
        return Landed::Unchanged;
    };
    let editing = state.form.editing_id();

    if let Err(e) = draft.validate() {
        return Landed::rejected(&state.form, e);
    }

    match api.check_email(&draft.email, editing).await {
        Ok(true) => return Landed::rejected(&state.form, ContactError::DuplicateEmail),
        Ok(false) => {}
        Err(e) => tracing::error!(error = %e, "error checking email"),
    }

    let written = match editing {
        None => api.create(draft).await,
        Some(id) => api.update(id, draft).await,
    };
    match written {
        Ok(_) => Landed::Done(list(api).await),
        Err(e) => Landed::rejected(&state.form, e),
    }
}

/// Delete the contact open in the edit form of `state`.
pub async fn delete<A: ContactApi>(api: &A, state: &DirectoryState) -> Landed {
    let Some(id) = state.form.editing_id() else {
        return Landed::Unchanged;
    };

    match api.delete(id).await {
        Ok(_) => Landed::Done(list(api).await),
        Err(e @ ContactError::NotFound) => Landed::Banner(e.to_string()),
        Err(e) => {
            tracing::error!(error = %e, "error deleting contact");
            Landed::Banner(DELETE_FAILED.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::error::{DUPLICATE_EMAIL_MESSAGE, NOT_FOUND_MESSAGE};
    use api::ContactService;
    use std::sync::Mutex;
    use store::MemoryStore;

    /// In-process backend that records which endpoints were hit.
    #[derive(Default)]
    struct Recorder {
        service: ContactService<MemoryStore>,
        calls: Mutex<Vec<&'static str>>,
        /// Pretend the pre-check raced and saw nothing.
        blind_precheck: bool,
        list_down: bool,
        check_down: bool,
        /// Fail create, update and delete.
        writes_down: bool,
    }

    fn offline() -> ContactError {
        ContactError::StoreUnavailable("connection refused".into())
    }

    impl Recorder {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        async fn seed(&self, name: &str, email: &str) -> Contact {
            self.service
                .create_contact(&ContactDraft::new(name, email))
                .await
                .unwrap()
        }
    }

    impl ContactApi for Recorder {
        async fn list(&self) -> Result<Vec<Contact>, ContactError> {
            self.record("list");
            if self.list_down {
                return Err(offline());
            }
            self.service.list().await
        }

        async fn check_email(
            &self,
            email: &str,
            exclude_id: Option<ContactId>,
        ) -> Result<bool, ContactError> {
            self.record("check_email");
            if self.check_down {
                return Err(offline());
            }
            if self.blind_precheck {
                return Ok(false);
            }
            self.service.check_email(email, exclude_id).await
        }

        async fn create(&self, draft: &ContactDraft) -> Result<Contact, ContactError> {
            self.record("create");
            if self.writes_down {
                return Err(offline());
            }
            self.service.create(draft).await
        }

        async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Contact, ContactError> {
            self.record("update");
            if self.writes_down {
                return Err(offline());
            }
            self.service.update(id, draft).await
        }

        async fn delete(&self, id: ContactId) -> Result<Contact, ContactError> {
            self.record("delete");
            if self.writes_down {
                return Err(offline());
            }
            self.service.delete(id).await
        }
    }

    fn contact(id: i64, name: &str, email: &str) -> Contact {
        Contact {
            id: ContactId(id),
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn typed(state: DirectoryState, name: &str, email: &str) -> DirectoryState {
        state.set_name(name.to_string()).set_email(email.to_string())
    }

    async fn submitted(api: &Recorder, state: DirectoryState) -> DirectoryState {
        let landed = submit(api, &state).await;
        state.land(landed)
    }

    async fn deleted(api: &Recorder, state: DirectoryState) -> DirectoryState {
        let landed = delete(api, &state).await;
        state.land(landed)
    }

    async fn loaded(api: &Recorder) -> DirectoryState {
        DirectoryState::default().land(refresh(api).await)
    }

    #[test]
    fn test_filter_matches_name_or_email_case_insensitively() {
        let contacts = vec![contact(1, "Ann Lee", "a@x.com"), contact(2, "Bob", "bob@y.com")];

        let names: Vec<&str> = filter_contacts(&contacts, "an")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ann Lee"]);

        assert_eq!(filter_contacts(&contacts, "Y.COM").len(), 1);
        assert_eq!(filter_contacts(&contacts, "").len(), 2);
        assert!(filter_contacts(&contacts, "zed").is_empty());
    }

    #[test]
    fn test_form_transitions() {
        let ann = contact(1, "Ann", "ann@x.com");
        let state = DirectoryState::default();
        assert_eq!(state.form, Form::Idle);

        let adding = state.clone().open_add();
        assert_eq!(
            adding.form,
            Form::Adding {
                draft: ContactDraft::default()
            }
        );
        // Opening another form while one is open does nothing
        assert_eq!(adding.clone().open_edit(ann.clone()), adding);
        assert_eq!(adding.cancel().form, Form::Idle);

        let editing = state.open_edit(ann.clone());
        assert_eq!(editing.form.editing_id(), Some(ann.id));
        assert_eq!(editing.form.draft(), Some(&ContactDraft::new("Ann", "ann@x.com")));

        // Edits touch the draft, never the cached contact
        let edited = editing.set_name("Annie".into());
        match &edited.form {
            Form::Editing { contact, draft } => {
                assert_eq!(contact, &ann);
                assert_eq!(draft.name, "Annie");
            }
            other => panic!("unexpected form {other:?}"),
        }
        assert_eq!(edited.cancel().form, Form::Idle);
    }

    #[test]
    fn test_typing_clears_errors() {
        let state = DirectoryState {
            email_error: Some("taken".into()),
            error: Some("boom".into()),
            ..DirectoryState::default().open_add()
        };

        let after_name = state.clone().set_name("A".into());
        assert_eq!(after_name.error, None);
        assert_eq!(after_name.email_error.as_deref(), Some("taken"));

        let after_email = state.set_email("a@x.com".into());
        assert_eq!(after_email.error, None);
        assert_eq!(after_email.email_error, None);
    }

    #[test]
    fn test_empty_messages() {
        let state = DirectoryState::default();
        assert_eq!(state.empty_message(), Some(NO_CONTACTS));

        let state = state.loaded(vec![contact(1, "Ann", "ann@x.com")]);
        assert_eq!(state.empty_message(), None);

        let state = state.set_query("zzz".into());
        assert_eq!(state.empty_message(), Some(NO_MATCHES));
        assert_eq!(state.clear_query().empty_message(), None);
    }

    #[test]
    fn test_email_error_after_close_is_dropped() {
        let state = DirectoryState::default()
            .open_add()
            .cancel()
            .land(Landed::EmailError(DUPLICATE_EMAIL_MESSAGE.into()));
        assert_eq!(state.form, Form::Idle);
        assert_eq!(state.email_error, None);
    }

    #[tokio::test]
    async fn test_add_success_refetches_list() {
        let api = Recorder::default();
        let state = typed(DirectoryState::default().open_add(), "Sam", "sam@z.com");

        let state = submitted(&api, state).await;
        assert_eq!(state.form, Form::Idle);
        assert_eq!(state.contacts.len(), 1);
        assert_eq!(state.contacts[0].email, "sam@z.com");
        assert_eq!(api.calls(), vec!["check_email", "create", "list"]);
    }

    #[tokio::test]
    async fn test_changes_during_submit_are_kept() {
        let api = Recorder::default();
        let started = typed(DirectoryState::default().open_add(), "Sam", "sam@z.com");

        let landed = submit(&api, &started).await;
        // The user kept typing in the search bar while the request ran
        let live = started.set_query("sam".into());
        let state = live.land(landed);

        assert_eq!(state.query, "sam");
        assert_eq!(state.form, Form::Idle);
        assert_eq!(state.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_after_cancel_keeps_form_closed() {
        let api = Recorder::default();
        api.seed("Sam", "sam@z.com").await;
        let started = typed(DirectoryState::default().open_add(), "Sam Two", "sam@z.com");

        let landed = submit(&api, &started).await;
        let state = started.cancel().land(landed);

        assert_eq!(state.form, Form::Idle);
        assert_eq!(state.email_error, None);
    }

    #[tokio::test]
    async fn test_duplicate_precheck_skips_write() {
        let api = Recorder::default();
        api.seed("Sam", "sam@z.com").await;
        let state = typed(DirectoryState::default().open_add(), "Sam Two", "sam@z.com");

        let state = submitted(&api, state).await;
        assert!(state.form.is_open());
        assert_eq!(state.email_error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));
        assert_eq!(state.error, None);
        assert_eq!(api.calls(), vec!["check_email"]);
    }

    #[tokio::test]
    async fn test_lost_race_surfaces_field_error() {
        let api = Recorder {
            blind_precheck: true,
            ..Recorder::default()
        };
        api.seed("Sam", "sam@z.com").await;
        let state = typed(DirectoryState::default().open_add(), "Sam Two", "sam@z.com");

        let state = submitted(&api, state).await;
        assert!(state.form.is_open());
        assert_eq!(state.email_error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));
        assert_eq!(state.error, None);
        assert_eq!(api.calls(), vec!["check_email", "create"]);
    }

    #[tokio::test]
    async fn test_failed_precheck_still_writes() {
        let api = Recorder {
            check_down: true,
            ..Recorder::default()
        };
        let state = typed(DirectoryState::default().open_add(), "Sam", "sam@z.com");

        let state = submitted(&api, state).await;
        assert_eq!(state.form, Form::Idle);
        assert_eq!(state.error, None);
        assert_eq!(state.contacts.len(), 1);
        assert_eq!(api.calls(), vec!["check_email", "create", "list"]);
    }

    #[tokio::test]
    async fn test_failed_precheck_still_hits_store_constraint() {
        let api = Recorder {
            check_down: true,
            ..Recorder::default()
        };
        api.seed("Sam", "sam@z.com").await;
        let state = typed(DirectoryState::default().open_add(), "Sam Two", "sam@z.com");

        let state = submitted(&api, state).await;
        assert!(state.form.is_open());
        assert_eq!(state.email_error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_add_keeps_form_and_list() {
        let api = Recorder::default();
        api.seed("Ann", "ann@x.com").await;
        let before = loaded(&api).await;
        let api = Recorder {
            writes_down: true,
            calls: Mutex::default(),
            ..api
        };

        let state = typed(before.clone().open_add(), "Sam", "sam@z.com");
        let state = submitted(&api, state).await;

        assert!(state.form.is_open());
        assert_eq!(state.error.as_deref(), Some("Failed to add contact"));
        assert_eq!(state.email_error, None);
        assert_eq!(state.contacts, before.contacts);
        assert!(!api.calls().contains(&"list"));
    }

    #[tokio::test]
    async fn test_failed_edit_reports_edit() {
        let api = Recorder::default();
        let ann = api.seed("Ann", "ann@x.com").await;
        let api = Recorder {
            writes_down: true,
            calls: Mutex::default(),
            ..api
        };

        let state = DirectoryState::default()
            .open_edit(ann.clone())
            .set_name("Ann Lee".into());
        let state = submitted(&api, state).await;

        assert_eq!(state.form.editing_id(), Some(ann.id));
        assert_eq!(state.error.as_deref(), Some("Failed to edit contact"));
        let stored = api.service.list_contacts().await.unwrap();
        assert_eq!(stored, vec![ann]);
    }

    #[tokio::test]
    async fn test_edit_of_deleted_contact_reports_not_found() {
        let api = Recorder::default();
        let ann = api.seed("Ann", "ann@x.com").await;
        let state = DirectoryState::default()
            .open_edit(ann.clone())
            .set_name("Ann Lee".into());

        // Removed by another session
        api.service.delete_contact(ann.id).await.unwrap();

        let state = submitted(&api, state).await;
        assert!(state.form.is_open());
        assert_eq!(state.error.as_deref(), Some(NOT_FOUND_MESSAGE));
        assert_eq!(state.email_error, None);
    }

    #[tokio::test]
    async fn test_edit_keeps_own_email() {
        let api = Recorder::default();
        let ann = api.seed("Ann", "ann@x.com").await;
        let state = loaded(&api).await;

        let state = state.open_edit(ann.clone()).set_name("Ann Lee".into());
        let state = submitted(&api, state).await;

        assert_eq!(state.form, Form::Idle);
        assert_eq!(state.email_error, None);
        assert_eq!(state.contacts, vec![contact(ann.id.0, "Ann Lee", "ann@x.com")]);
    }

    #[tokio::test]
    async fn test_edit_to_taken_email_stays_open() {
        let api = Recorder::default();
        let one = api.seed("One", "one@x.com").await;
        api.seed("Two", "two@x.com").await;

        let state = DirectoryState::default()
            .open_edit(one.clone())
            .set_email("two@x.com".into());
        let state = submitted(&api, state).await;

        assert_eq!(state.form.editing_id(), Some(one.id));
        assert!(state.email_error.is_some());
        assert!(!api.calls().contains(&"update"));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let api = Recorder::default();
        let state = typed(DirectoryState::default().open_add(), "Sam", "not-an-email");

        let state = submitted(&api, state).await;
        assert!(state.form.is_open());
        assert_eq!(state.email_error.as_deref(), Some("Invalid email address"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let api = Recorder::default();
        let bob = api.seed("Bob", "bob@y.com").await;
        let state = loaded(&api).await;

        let state = deleted(&api, state.open_edit(bob.clone())).await;
        assert_eq!(state.form, Form::Idle);
        assert!(state.contacts.is_empty());

        // Deleted elsewhere: form stays, banner explains
        let state = deleted(&api, state.open_edit(bob)).await;
        assert!(state.form.is_open());
        assert_eq!(state.error.as_deref(), Some(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_contact() {
        let api = Recorder::default();
        let bob = api.seed("Bob", "bob@y.com").await;
        let before = loaded(&api).await;
        let api = Recorder {
            writes_down: true,
            calls: Mutex::default(),
            ..api
        };

        let state = deleted(&api, before.clone().open_edit(bob.clone())).await;
        assert_eq!(state.form.editing_id(), Some(bob.id));
        assert_eq!(state.error.as_deref(), Some(DELETE_FAILED));
        assert_eq!(state.contacts, before.contacts);
        assert_eq!(api.service.list_contacts().await.unwrap(), vec![bob]);
    }

    #[tokio::test]
    async fn test_delete_outside_editing_is_ignored() {
        let api = Recorder::default();
        let state = DirectoryState::default().open_add();
        assert_eq!(delete(&api, &state).await, Landed::Unchanged);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_stale_list() {
        let api = Recorder::default();
        api.seed("Ann", "ann@x.com").await;
        let state = loaded(&api).await;
        assert_eq!(state.contacts.len(), 1);

        let api = Recorder {
            list_down: true,
            calls: Mutex::default(),
            ..api
        };
        let state = state.land(refresh(&api).await);
        assert_eq!(state.contacts.len(), 1);
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED));
    }
}
