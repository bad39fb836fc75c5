//! Wizard engine.
//!
//! Drives one wizard instance through its steps:
//!
//! ```text
//! Editing(1) --next--> Editing(2) --next--> ... Editing(N) --submit--> Submitting
//!     ^                                                                  |
//!     |                           failure (banner, draft kept)           |
//!     +------------------------- Editing(N) <----------------------------+
//!                                                                        |
//!                                 success (stored draft cleared)         v
//!                                                                    Completed
//! ```
//!
//! Every field mutation and every step transition is written to the
//! [`DraftStore`]; a failed write is logged and never fails the edit.
//! Submission is split into [`WizardEngine::begin_submit`] and
//! [`WizardEngine::finish_submit`] so a caller can run the sink call
//! elsewhere; while a ticket is outstanding every further submit is refused.

pub mod payload;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use hireflow_types::draft::{ErrorMap, PersistedDraft, StoredDraft, WizardDraft};
use hireflow_types::error::{SinkError, WizardError};
use hireflow_types::field::{FieldValue, FileRef};
use hireflow_types::submission::{SubmissionPayload, SubmissionResponse};
use hireflow_types::wizard::WizardKind;

use crate::array_field;
use crate::definition::{FieldKind, FieldSpec, WizardDefinition, definition_for};
use crate::draft_store::DraftStore;
use crate::session::SessionContext;
use crate::sink::SubmissionSink;
use crate::validate::step::{validate_all, validate_field, validate_step};

/// Banner text when the backend gave no message of its own.
pub const GENERIC_FAILURE: &str = "Submission failed, please try again.";

/// Banner text when the backend rejected the session credential.
pub const SESSION_EXPIRED: &str = "Your session has expired. Sign in again to submit.";

// ---------------------------------------------------------------------------
// State and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Editing { step: u8 },
    Submitting,
    /// Accepted by the backend; `data` is whatever the response carried.
    Completed { data: Option<Value> },
}

/// Result of `next` / `previous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { step: u8 },
    /// The step's rules failed; the step is unchanged.
    Blocked { errors: ErrorMap },
    AtFirstStep,
    /// `next` on the last step; use `submit` instead.
    AtFinalStep,
}

/// Proof that a submission was started. Hand it back to
/// [`WizardEngine::finish_submit`] with the sink's answer.
#[derive(Debug)]
pub struct SubmissionTicket {
    instance: Uuid,
    attempt: u64,
    payload: SubmissionPayload,
}

impl SubmissionTicket {
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }
}

#[derive(Debug)]
pub enum SubmitStart {
    Ready(SubmissionTicket),
    /// Re-validation failed; the engine moved to `step`.
    Invalid { step: u8, errors: ErrorMap },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed { data: Option<Value> },
    Invalid { step: u8, errors: ErrorMap },
    /// Back on the last step with `message` as the banner.
    Failed { message: String },
    /// The ticket belongs to an earlier attempt or a discarded draft.
    Stale,
}

/// Result of [`WizardEngine::primary_action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Step(Transition),
    Submit(SubmitOutcome),
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct WizardEngine<S, K> {
    definition: &'static WizardDefinition,
    store: Arc<S>,
    sink: Arc<K>,
    session: SessionContext,
    /// Changes on discard so tickets from before it are ignored.
    instance: Uuid,
    attempt: u64,
    phase: Phase,
    fields: BTreeMap<String, FieldValue>,
    selections: BTreeMap<String, String>,
    errors: ErrorMap,
    touched: BTreeSet<String>,
    banner: Option<String>,
    created_at: DateTime<Utc>,
}

impl<S: DraftStore, K: SubmissionSink> WizardEngine<S, K> {
    /// A fresh engine on step 1, ignoring anything in the store.
    pub fn new(kind: WizardKind, store: Arc<S>, sink: Arc<K>, session: SessionContext) -> Self {
        let definition = definition_for(kind);
        Self {
            definition,
            store,
            sink,
            session,
            instance: Uuid::now_v7(),
            attempt: 0,
            phase: Phase::Editing { step: 1 },
            fields: fresh_fields(definition),
            selections: default_selections(definition),
            errors: ErrorMap::new(),
            touched: BTreeSet::new(),
            banner: None,
            created_at: Utc::now(),
        }
    }

    /// An engine resumed from the stored draft for `kind`, or fresh if there
    /// is none. Unreadable drafts are dropped with a warning.
    pub async fn mount(
        kind: WizardKind,
        store: Arc<S>,
        sink: Arc<K>,
        session: SessionContext,
    ) -> Self {
        let mut engine = Self::new(kind, store, sink, session);

        let loaded = engine.store.load_draft(kind).await;
        match loaded {
            Ok(Some(stored)) => match serde_json::from_str::<PersistedDraft>(&stored.state_json) {
                Ok(persisted) => {
                    engine.hydrate(persisted);
                    engine.created_at = stored.created_at;
                    debug!(
                        wizard = %kind,
                        step = engine.current_step(),
                        "resumed saved draft"
                    );
                }
                Err(e) => {
                    warn!(wizard = %kind, error = %e, "discarding unreadable draft");
                }
            },
            Ok(None) => debug!(wizard = %kind, "no saved draft"),
            Err(e) => warn!(wizard = %kind, error = %e, "failed to load draft, starting fresh"),
        }

        engine
    }

    /// Apply a persisted draft, keeping only what still fits the schema.
    fn hydrate(&mut self, persisted: PersistedDraft) {
        let mut restored = persisted.fields;
        for spec in self.definition.fields {
            if spec.is_secret() {
                continue;
            }
            let Some(value) = restored.remove(spec.name) else {
                continue;
            };
            if !fits(spec, &value) {
                debug!(field = spec.name, "dropping restored value of the wrong shape");
                continue;
            }
            let value = match value {
                FieldValue::List(mut items) => {
                    array_field::ensure_floor(&mut items);
                    FieldValue::List(items)
                }
                other => other,
            };
            self.fields.insert(spec.name.to_string(), value);
        }

        for selection in self.definition.selections {
            if let Some(value) = persisted.selections.get(selection.key)
                && selection.options.contains(&value.as_str())
            {
                self.selections
                    .insert(selection.key.to_string(), value.clone());
            }
        }

        let step = persisted.current_step.clamp(1, self.total_steps());
        self.phase = Phase::Editing { step };
    }

    // -- accessors ----------------------------------------------------------

    pub fn kind(&self) -> WizardKind {
        self.definition.kind
    }

    pub fn definition(&self) -> &'static WizardDefinition {
        self.definition
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Step being shown; the last step while submitting or completed.
    pub fn current_step(&self) -> u8 {
        match self.phase {
            Phase::Editing { step } => step,
            Phase::Submitting | Phase::Completed { .. } => self.total_steps(),
        }
    }

    pub fn total_steps(&self) -> u8 {
        self.definition.total_steps()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn selection(&self, key: &str) -> Option<&str> {
        self.selections.get(key).map(String::as_str)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Snapshot of the draft as plain data.
    pub fn draft(&self) -> WizardDraft {
        WizardDraft {
            kind: self.kind(),
            fields: self.fields.clone(),
            current_step: self.current_step(),
            total_steps: self.total_steps(),
            errors: self.errors.clone(),
            selections: self.selections.clone(),
            is_submitting: self.is_submitting(),
            is_terminal: self.is_terminal(),
        }
    }

    // -- editing ------------------------------------------------------------

    /// Replace a field's value.
    ///
    /// Returns `Ok(false)` without applying anything while submitting or
    /// after completion. The field's own error is cleared; rules that read
    /// this field are re-run against their targets.
    pub async fn set_field(&mut self, name: &str, value: FieldValue) -> Result<bool, WizardError> {
        let spec = self.spec(name)?;
        let expected = spec.default_value();
        if !value.same_type(&expected) {
            return Err(WizardError::TypeMismatch {
                field: name.to_string(),
                expected: expected.type_name(),
            });
        }
        if let FieldValue::Choice(choice) = &value
            && !spec.options().contains(&choice.as_str())
        {
            return Err(WizardError::InvalidChoice {
                field: name.to_string(),
                value: choice.clone(),
            });
        }
        if !self.is_editable() {
            debug!(wizard = %self.kind(), field = name, "edit ignored, wizard is not editing");
            return Ok(false);
        }

        let value = match value {
            FieldValue::List(mut items) => {
                array_field::ensure_floor(&mut items);
                FieldValue::List(items)
            }
            other => other,
        };
        self.fields.insert(name.to_string(), value);
        self.field_changed(name).await;
        Ok(true)
    }

    /// Set a text, long text, secret or choice field.
    pub async fn set_text(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<bool, WizardError> {
        let spec = self.spec(name)?;
        let value = match spec.kind {
            FieldKind::Text | FieldKind::LongText | FieldKind::Secret => {
                FieldValue::Text(value.into())
            }
            FieldKind::Choice { .. } => FieldValue::Choice(value.into()),
            _ => {
                return Err(WizardError::TypeMismatch {
                    field: name.to_string(),
                    expected: spec.default_value().type_name(),
                });
            }
        };
        self.set_field(name, value).await
    }

    pub async fn set_flag(&mut self, name: &str, value: bool) -> Result<bool, WizardError> {
        self.set_field(name, FieldValue::Flag(value)).await
    }

    pub async fn set_file(
        &mut self,
        name: &str,
        file: Option<FileRef>,
    ) -> Result<bool, WizardError> {
        self.set_field(name, FieldValue::File(file)).await
    }

    pub async fn set_list(&mut self, name: &str, items: Vec<String>) -> Result<bool, WizardError> {
        self.set_field(name, FieldValue::List(items)).await
    }

    /// Append an empty entry to a list field.
    pub async fn add_entry(&mut self, name: &str) -> Result<bool, WizardError> {
        let Some(list) = self.list_mut(name)? else {
            return Ok(false);
        };
        array_field::add(list);
        self.field_changed(name).await;
        Ok(true)
    }

    /// Replace one entry of a list field; out-of-bounds is a no-op.
    pub async fn update_entry(
        &mut self,
        name: &str,
        index: usize,
        value: impl Into<String>,
    ) -> Result<bool, WizardError> {
        let Some(list) = self.list_mut(name)? else {
            return Ok(false);
        };
        if !array_field::update(list, index, value) {
            return Ok(false);
        }
        self.field_changed(name).await;
        Ok(true)
    }

    /// Remove one entry of a list field; the last remaining entry stays.
    pub async fn remove_entry(&mut self, name: &str, index: usize) -> Result<bool, WizardError> {
        let Some(list) = self.list_mut(name)? else {
            return Ok(false);
        };
        if !array_field::remove(list, index) {
            return Ok(false);
        }
        self.field_changed(name).await;
        Ok(true)
    }

    /// Set an auxiliary selection such as the resume template.
    pub async fn select(&mut self, key: &str, value: &str) -> Result<bool, WizardError> {
        let selection = self
            .definition
            .selection(key)
            .ok_or_else(|| WizardError::UnknownField(key.to_string()))?;
        if !selection.options.contains(&value) {
            return Err(WizardError::InvalidChoice {
                field: key.to_string(),
                value: value.to_string(),
            });
        }
        if !self.is_editable() {
            return Ok(false);
        }
        self.selections.insert(key.to_string(), value.to_string());
        self.persist().await;
        Ok(true)
    }

    /// Mark a field touched and validate it on its own.
    pub fn blur(&mut self, name: &str) -> Result<Option<&'static str>, WizardError> {
        self.spec(name)?;
        self.touched.insert(name.to_string());
        let message = validate_field(self.definition, name, &self.fields);
        match message {
            Some(m) => {
                self.errors.insert(name.to_string(), m.to_string());
            }
            None => {
                self.errors.remove(name);
            }
        }
        Ok(message)
    }

    // -- navigation ---------------------------------------------------------

    /// Advance one step if the current step validates.
    pub async fn next(&mut self) -> Result<Transition, WizardError> {
        let step = self.editing_step()?;
        if step >= self.total_steps() {
            return Ok(Transition::AtFinalStep);
        }

        let errors = validate_step(self.definition, step, &self.fields);
        self.apply_step_errors(step, &errors);
        if !errors.is_empty() {
            debug!(wizard = %self.kind(), step, failed = errors.len(), "step blocked");
            return Ok(Transition::Blocked { errors });
        }

        let step = step + 1;
        self.phase = Phase::Editing { step };
        debug!(wizard = %self.kind(), step, "advanced");
        self.persist().await;
        Ok(Transition::Moved { step })
    }

    /// Go back one step; no-op on step 1.
    pub async fn previous(&mut self) -> Result<Transition, WizardError> {
        let step = self.editing_step()?;
        if step <= 1 {
            return Ok(Transition::AtFirstStep);
        }

        let step = step - 1;
        self.phase = Phase::Editing { step };
        debug!(wizard = %self.kind(), step, "went back");
        self.persist().await;
        Ok(Transition::Moved { step })
    }

    /// The single forward button: submit on the last step, `next` before it.
    pub async fn primary_action(&mut self) -> Result<Action, WizardError> {
        let step = self.editing_step()?;
        if step == self.total_steps() {
            Ok(Action::Submit(self.submit().await?))
        } else {
            Ok(Action::Step(self.next().await?))
        }
    }

    // -- submission ---------------------------------------------------------

    /// Validate, call the sink once, and settle the result.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        match self.begin_submit().await? {
            SubmitStart::Invalid { step, errors } => Ok(SubmitOutcome::Invalid { step, errors }),
            SubmitStart::Ready(ticket) => {
                let sink = Arc::clone(&self.sink);
                let result = sink.submit(ticket.payload()).await;
                Ok(self.finish_submit(ticket, result).await)
            }
        }
    }

    /// Enter `Submitting` and hand out the payload to send.
    ///
    /// Only allowed on the last step. Every step is re-validated first; on
    /// failure the engine moves to the first failing step instead.
    pub async fn begin_submit(&mut self) -> Result<SubmitStart, WizardError> {
        let step = self.editing_step()?;
        let total = self.total_steps();
        if step != total {
            return Err(WizardError::NotAtFinalStep { step, total });
        }
        if self.definition.requires_auth && !self.session.is_authenticated() {
            return Err(WizardError::Unauthenticated);
        }

        if let Some((failing, errors)) = validate_all(self.definition, &self.fields) {
            self.apply_step_errors(failing, &errors);
            self.phase = Phase::Editing { step: failing };
            debug!(wizard = %self.kind(), step = failing, "submit blocked by validation");
            self.persist().await;
            return Ok(SubmitStart::Invalid {
                step: failing,
                errors,
            });
        }

        self.attempt += 1;
        self.phase = Phase::Submitting;
        self.banner = None;
        let payload = payload::build_payload(self.definition, &self.fields, &self.selections);
        info!(
            wizard = %self.kind(),
            attempt = self.attempt,
            endpoint = %payload.endpoint,
            "submitting"
        );

        Ok(SubmitStart::Ready(SubmissionTicket {
            instance: self.instance,
            attempt: self.attempt,
            payload,
        }))
    }

    /// Settle a submission started by [`begin_submit`](Self::begin_submit).
    pub async fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<SubmissionResponse, SinkError>,
    ) -> SubmitOutcome {
        if ticket.instance != self.instance
            || ticket.attempt != self.attempt
            || !self.is_submitting()
        {
            debug!(wizard = %self.kind(), attempt = ticket.attempt, "ignoring stale submission result");
            return SubmitOutcome::Stale;
        }

        let message = match result {
            Ok(response) if response.success => {
                info!(wizard = %self.kind(), "submission accepted");
                if let Err(e) = self.store.delete_draft(self.kind()).await {
                    warn!(wizard = %self.kind(), error = %e, "failed to clear submitted draft");
                }
                self.errors.clear();
                self.touched.clear();
                self.phase = Phase::Completed {
                    data: response.data.clone(),
                };
                return SubmitOutcome::Completed {
                    data: response.data,
                };
            }
            Ok(response) => {
                warn!(wizard = %self.kind(), message = ?response.message, "submission rejected");
                response.message.filter(|m| !m.trim().is_empty())
            }
            Err(e) => {
                warn!(wizard = %self.kind(), error = %e, "submission failed");
                non_retryable_message(&e)
            }
        };

        let message = message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
        self.phase = Phase::Editing {
            step: self.total_steps(),
        };
        self.banner = Some(message.clone());
        SubmitOutcome::Failed { message }
    }

    /// Drop the stored draft and start over on step 1.
    ///
    /// Any outstanding submission ticket becomes stale.
    pub async fn discard(&mut self) {
        if let Err(e) = self.store.delete_draft(self.kind()).await {
            warn!(wizard = %self.kind(), error = %e, "failed to delete draft");
        }
        self.instance = Uuid::now_v7();
        self.phase = Phase::Editing { step: 1 };
        self.fields = fresh_fields(self.definition);
        self.selections = default_selections(self.definition);
        self.errors.clear();
        self.touched.clear();
        self.banner = None;
        self.created_at = Utc::now();
        debug!(wizard = %self.kind(), "draft discarded");
    }

    // -- internals ----------------------------------------------------------

    fn spec(&self, name: &str) -> Result<&'static FieldSpec, WizardError> {
        self.definition
            .field(name)
            .ok_or_else(|| WizardError::UnknownField(name.to_string()))
    }

    fn is_editable(&self) -> bool {
        matches!(self.phase, Phase::Editing { .. })
    }

    fn editing_step(&self) -> Result<u8, WizardError> {
        match self.phase {
            Phase::Editing { step } => Ok(step),
            Phase::Submitting => Err(WizardError::SubmissionInFlight),
            Phase::Completed { .. } => Err(WizardError::AlreadyCompleted),
        }
    }

    /// Mutable list behind a list field, `None` when edits are blocked.
    fn list_mut(&mut self, name: &str) -> Result<Option<&mut Vec<String>>, WizardError> {
        let spec = self.spec(name)?;
        if !matches!(spec.kind, FieldKind::List) {
            return Err(WizardError::TypeMismatch {
                field: name.to_string(),
                expected: spec.default_value().type_name(),
            });
        }
        if !self.is_editable() {
            return Ok(None);
        }

        let entry = self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| spec.default_value());
        if !matches!(entry, FieldValue::List(_)) {
            *entry = spec.default_value();
        }
        match entry {
            FieldValue::List(items) => Ok(Some(items)),
            _ => Ok(None),
        }
    }

    async fn field_changed(&mut self, name: &str) {
        self.errors.remove(name);
        self.revalidate_dependents(name);
        self.persist().await;
    }

    /// Re-run rules that read `changed` against their targets, for targets
    /// the user has already engaged with.
    fn revalidate_dependents(&mut self, changed: &str) {
        let targets: BTreeSet<&'static str> = self
            .definition
            .all_rules()
            .filter(|rule| rule.dependencies().iter().any(|dep| *dep == changed))
            .map(|rule| rule.target())
            .collect();

        for target in targets {
            let engaged = self.touched.contains(target)
                || self.fields.get(target).is_some_and(|v| !v.is_blank());
            if !engaged {
                continue;
            }
            match validate_field(self.definition, target, &self.fields) {
                Some(message) => {
                    self.errors.insert(target.to_string(), message.to_string());
                }
                None => {
                    self.errors.remove(target);
                }
            }
        }
    }

    /// Replace the errors of a step's fields with `errors`; on failure every
    /// field of the step becomes touched.
    fn apply_step_errors(&mut self, step: u8, errors: &ErrorMap) {
        let names: Vec<&'static str> = self
            .definition
            .fields_in_step(step)
            .map(|f| f.name)
            .chain(self.definition.rules_for(step).iter().map(|r| r.target()))
            .collect();

        for name in names {
            self.errors.remove(name);
            if !errors.is_empty() {
                self.touched.insert(name.to_string());
            }
        }
        self.errors
            .extend(errors.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Write the draft to the store. Secret fields are never written.
    async fn persist(&self) {
        let saved_at = Utc::now();
        let persisted = PersistedDraft {
            fields: self
                .fields
                .iter()
                .filter(|(name, _)| {
                    self.definition
                        .field(name)
                        .is_some_and(|spec| !spec.is_secret())
                })
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            current_step: self.current_step(),
            selections: self.selections.clone(),
            saved_at,
        };

        let state_json = match serde_json::to_string(&persisted) {
            Ok(json) => json,
            Err(e) => {
                warn!(wizard = %self.kind(), error = %e, "failed to serialize draft");
                return;
            }
        };

        let stored = StoredDraft {
            kind: self.kind(),
            state_json,
            created_at: self.created_at,
            updated_at: saved_at,
        };
        if let Err(e) = self.store.save_draft(stored).await {
            warn!(wizard = %self.kind(), error = %e, "failed to save draft");
        }
    }
}

fn fresh_fields(def: &WizardDefinition) -> BTreeMap<String, FieldValue> {
    def.fields
        .iter()
        .map(|spec| (spec.name.to_string(), spec.default_value()))
        .collect()
}

fn default_selections(def: &WizardDefinition) -> BTreeMap<String, String> {
    def.selections
        .iter()
        .map(|s| (s.key.to_string(), s.default_option().to_string()))
        .collect()
}

/// Whether a restored value can stand in for the field.
fn fits(spec: &FieldSpec, value: &FieldValue) -> bool {
    if !value.same_type(&spec.default_value()) {
        return false;
    }
    match value {
        FieldValue::Choice(choice) => spec.options().contains(&choice.as_str()),
        _ => true,
    }
}

/// Banner for sink failures that retrying cannot fix.
fn non_retryable_message(error: &SinkError) -> Option<String> {
    match error {
        SinkError::Unauthenticated => Some(SESSION_EXPIRED.to_string()),
        SinkError::Attachment { path, .. } => {
            Some(format!("Could not read '{path}'. Choose the file again."))
        }
        _ => None,
    }
}
