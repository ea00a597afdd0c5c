//! # Resource Service
//!
//! `ResourceService<T, R>` runs the full lifecycle of one entity type over a
//! [`Repository`]:
//!
//! 1. Normalize the reference (`MandatoryReference` when blank).
//! 2. Look up the stored record and apply the existence rule of the [`OperationKind`].
//! 3. Build, merge or act on the record, then [`ResourceEntity::normalize`] it.
//! 4. Save through the repository, wrapping storage failures as `UnknownError` causes.
//! 5. Return a success envelope, or hand the failure to the [`ErrorDecoder`].
//!
//! Mutations always return a [`ResponseEnvelope`]; reads return the records directly and
//! only fall back to an envelope on failure. No failure escapes as a panic or a bare error.

use std::marker::PhantomData;
use tracing::{debug, info, Instrument, Span};

use crate::decoder::ErrorDecoder;
use crate::entity::{ResourceEntity, ServiceSettings};
use crate::envelope::ResponseEnvelope;
use crate::error::ResourceError;
use crate::lifecycle::{LifecycleValidator, OperationKind, Proceed};
use crate::reference::Reference;
use crate::store::{Repository, StoreClient, StoreError};

pub struct ResourceService<T: ResourceEntity, R: Repository<T> = StoreClient<T>> {
    repository: R,
    settings: ServiceSettings,
    validator: LifecycleValidator,
    decoder: ErrorDecoder,
    span: Span,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ResourceEntity, R: Repository<T> + Clone> Clone for ResourceService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            settings: self.settings,
            validator: self.validator.clone(),
            decoder: self.decoder.clone(),
            span: self.span.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: ResourceEntity, R: Repository<T>> ResourceService<T, R> {
    /// Every log line emitted by the service, its validator and its decoder is recorded
    /// inside `span`.
    pub fn new(repository: R, settings: ServiceSettings, span: Span) -> Self {
        Self {
            repository,
            settings,
            validator: LifecycleValidator::for_entity::<T>(span.clone()),
            decoder: ErrorDecoder::new(span.clone()),
            span,
            _entity: PhantomData,
        }
    }

    pub fn with_settings(repository: R, settings: ServiceSettings) -> Self {
        let span = tracing::info_span!("resource", entity_type = T::ENTITY_NAME);
        Self::new(repository, settings, span)
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    // --- Reads ---

    pub async fn get(&self, reference: Option<&str>) -> Result<T, ResponseEnvelope<T>> {
        let mut path = T::BASE_PATH.to_string();
        let outcome = self
            .try_get(reference, &mut path)
            .instrument(self.span.clone())
            .await;
        outcome.map_err(|error| self.decoder.decode(path, &error))
    }

    /// Records matching `filter`. An empty result is a 404 envelope.
    pub async fn list(&self, filter: T::Filter) -> Result<Vec<T>, ResponseEnvelope<T>> {
        let outcome = self
            .try_list(Some(filter))
            .instrument(self.span.clone())
            .await;
        outcome.map_err(|error| self.decoder.decode(T::BASE_PATH, &error))
    }

    pub async fn list_all(&self) -> Result<Vec<T>, ResponseEnvelope<T>> {
        let outcome = self.try_list(None).instrument(self.span.clone()).await;
        outcome.map_err(|error| self.decoder.decode(T::BASE_PATH, &error))
    }

    // --- Mutations ---

    pub async fn create(&self, body: T::Body) -> ResponseEnvelope<T> {
        let mut path = T::BASE_PATH.to_string();
        let outcome = self
            .try_create(body, &mut path)
            .instrument(self.span.clone())
            .await;
        self.respond(outcome, path)
    }

    /// Full replacement. The stored identity and reference are kept, whatever the body says.
    pub async fn replace(&self, reference: Option<&str>, body: T::Body) -> ResponseEnvelope<T> {
        let mut path = T::BASE_PATH.to_string();
        let outcome = self
            .try_replace(reference, body, &mut path)
            .instrument(self.span.clone())
            .await;
        self.respond(outcome, path)
    }

    /// Copies only the fields present in `body`.
    pub async fn patch(&self, reference: Option<&str>, body: T::Body) -> ResponseEnvelope<T> {
        let mut path = T::BASE_PATH.to_string();
        let outcome = self
            .try_patch(reference, body, &mut path)
            .instrument(self.span.clone())
            .await;
        self.respond(outcome, path)
    }

    /// Removes the record and returns it as the payload.
    pub async fn delete(&self, reference: Option<&str>) -> ResponseEnvelope<T> {
        let mut path = T::BASE_PATH.to_string();
        let outcome = self
            .try_delete(reference, &mut path)
            .instrument(self.span.clone())
            .await;
        self.respond(outcome, path)
    }

    /// Runs a resource-specific action on a stored record.
    pub async fn perform(&self, reference: Option<&str>, action: T::Action) -> ResponseEnvelope<T> {
        let mut path = T::BASE_PATH.to_string();
        let outcome = self
            .try_perform(reference, action, &mut path)
            .instrument(self.span.clone())
            .await;
        self.respond(outcome, path)
    }

    fn respond(
        &self,
        outcome: Result<ResponseEnvelope<T>, ResourceError>,
        path: String,
    ) -> ResponseEnvelope<T> {
        outcome.unwrap_or_else(|error| self.decoder.decode(path, &error))
    }

    // --- Lifecycle steps ---

    async fn try_get(&self, raw: Option<&str>, path: &mut String) -> Result<T, ResourceError> {
        let reference = self.validator.require_reference(raw)?;
        *path = self.validator.location(&reference);
        let existing = self.lookup(&reference).await?;
        let record = self.validator.require_found(&reference, existing)?;
        debug!(%reference, "Found");
        Ok(record)
    }

    async fn try_list(&self, filter: Option<T::Filter>) -> Result<Vec<T>, ResourceError> {
        let rows = match filter {
            Some(filter) => {
                debug!(?filter, "Listing");
                self.repository.find_where(filter).await
            }
            None => self.repository.find_all().await,
        }
        .map_err(|e| self.storage_failure("list", None, e))?;
        self.validator.check_collection(rows)
    }

    async fn try_create(
        &self,
        body: T::Body,
        path: &mut String,
    ) -> Result<ResponseEnvelope<T>, ResourceError> {
        debug!(?body, "Create");
        let reference = self.validator.require_reference(T::body_reference(&body))?;
        *path = self.validator.location(&reference);

        let existing = self.lookup(&reference).await?;
        let Proceed {
            reference,
            location,
            ..
        } = self
            .validator
            .check_existence(OperationKind::Create, reference, existing)?;

        let mut record = T::from_body(reference.clone(), body);
        record.on_create();
        let saved = self.store(record, &reference).await?;
        info!(%reference, "Created");
        Ok(ResponseEnvelope::success(OperationKind::Create, location, saved))
    }

    async fn try_replace(
        &self,
        raw: Option<&str>,
        body: T::Body,
        path: &mut String,
    ) -> Result<ResponseEnvelope<T>, ResourceError> {
        debug!(?body, "Replace");
        let (current, reference, location) = self
            .load_existing(OperationKind::FullUpdate, raw, path)
            .await?;

        if let Some(requested) = Reference::normalize(T::body_reference(&body)) {
            if requested != reference {
                debug!(%reference, %requested, "Body reference ignored");
            }
        }
        let mut record = T::from_body(reference.clone(), body);
        if let Some(id) = current.id() {
            record.assign_id(id);
        }
        let saved = self.store(record, &reference).await?;
        info!(%reference, "Replaced");
        Ok(ResponseEnvelope::success(
            OperationKind::FullUpdate,
            location,
            saved,
        ))
    }

    async fn try_patch(
        &self,
        raw: Option<&str>,
        body: T::Body,
        path: &mut String,
    ) -> Result<ResponseEnvelope<T>, ResourceError> {
        debug!(?body, "Patch");
        let (mut record, reference, location) = self
            .load_existing(OperationKind::PartialUpdate, raw, path)
            .await?;

        record.merge(body);
        let saved = self.store(record, &reference).await?;
        info!(%reference, "Patched");
        Ok(ResponseEnvelope::success(
            OperationKind::PartialUpdate,
            location,
            saved,
        ))
    }

    async fn try_delete(
        &self,
        raw: Option<&str>,
        path: &mut String,
    ) -> Result<ResponseEnvelope<T>, ResourceError> {
        let (record, reference, location) = self
            .load_existing(OperationKind::Delete, raw, path)
            .await?;

        let id = record
            .id()
            .ok_or_else(|| ResourceError::not_found(T::ENTITY_NAME, Some(reference.clone())))?;
        self.repository
            .delete(id)
            .await
            .map_err(|e| self.storage_failure("delete", Some(&reference), e))?;
        info!(%reference, "Deleted");
        Ok(ResponseEnvelope::success(
            OperationKind::Delete,
            location,
            record,
        ))
    }

    async fn try_perform(
        &self,
        raw: Option<&str>,
        action: T::Action,
        path: &mut String,
    ) -> Result<ResponseEnvelope<T>, ResourceError> {
        debug!(?action, "Perform");
        let (mut record, reference, location) = self
            .load_existing(OperationKind::Other, raw, path)
            .await?;

        record.apply(action)?;
        let saved = self.store(record, &reference).await?;
        info!(%reference, "Action applied");
        Ok(ResponseEnvelope::success(OperationKind::Other, location, saved))
    }

    /// Steps 1 and 2 for every kind that targets a stored record.
    async fn load_existing(
        &self,
        kind: OperationKind,
        raw: Option<&str>,
        path: &mut String,
    ) -> Result<(T, Reference, String), ResourceError> {
        let reference = self.validator.require_reference(raw)?;
        *path = self.validator.location(&reference);

        let existing = self.lookup(&reference).await?;
        let Proceed {
            reference,
            existing,
            location,
        } = self.validator.check_existence(kind, reference, existing)?;
        let current = existing
            .ok_or_else(|| ResourceError::not_found(T::ENTITY_NAME, Some(reference.clone())))?;
        Ok((current, reference, location))
    }

    async fn lookup(&self, reference: &Reference) -> Result<Option<T>, ResourceError> {
        self.repository
            .find_by_reference(reference)
            .await
            .map_err(|e| self.storage_failure("read", Some(reference), e))
    }

    async fn store(&self, mut record: T, reference: &Reference) -> Result<T, ResourceError> {
        record.normalize(&self.settings);
        self.repository
            .save(record)
            .await
            .map_err(|e| self.storage_failure("persist", Some(reference), e))
    }

    fn storage_failure(
        &self,
        action: &str,
        reference: Option<&Reference>,
        error: StoreError,
    ) -> ResourceError {
        let message = match reference {
            Some(reference) => format!("Could not {action} the {} {reference}", T::ENTITY_NAME),
            None => format!("Could not {action} the {} records", T::ENTITY_NAME),
        };
        ResourceError::from(error).within(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::error::FieldViolation;
    use crate::mock::{MockRepository, RepositoryCall};
    use crate::test_support::{gadget, Gadget, GadgetAction, GadgetBody, GadgetFilter};

    fn service(
        repository: &MockRepository<Gadget>,
    ) -> ResourceService<Gadget, MockRepository<Gadget>> {
        ResourceService::with_settings(repository.clone(), ServiceSettings::default())
    }

    fn body(reference: Option<&str>, available: Option<i64>) -> GadgetBody {
        GadgetBody {
            reference: reference.map(str::to_string),
            price: None,
            available,
        }
    }

    #[tokio::test]
    async fn test_missing_reference_never_touches_storage() {
        let repository = MockRepository::new();
        let service = service(&repository);

        for raw in [None, Some(""), Some("   ")] {
            let created = service.create(body(raw, Some(1))).await;
            assert_eq!(created.status, 400);
            assert_eq!(created.path, "/gadgets");
            assert_eq!(created.message, "The gadget reference is mandatory");

            assert_eq!(service.replace(raw, body(None, None)).await.status, 400);
            assert_eq!(service.patch(raw, body(None, None)).await.status, 400);
            assert_eq!(service.delete(raw).await.status, 400);
            assert_eq!(service.perform(raw, GadgetAction::Retire).await.status, 400);
            assert_eq!(service.get(raw).await.unwrap_err().status, 400);
        }
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_normalizes_and_saves_once() {
        let repository = MockRepository::new();
        let service = service(&repository);

        let mut request = body(Some(" gadget-001 "), Some(3));
        request.price = Some(12.346);
        let envelope = service.create(request).await;

        assert_eq!(envelope.status, 201);
        assert_eq!(envelope.message, "Creation successful");
        assert_eq!(envelope.path, "/gadgets/GADGET-001");
        let saved = envelope.payload.unwrap();
        assert_eq!(saved.reference.as_str(), "GADGET-001");
        assert_eq!(saved.price, Some(12.35));
        assert_eq!(saved.id, Some(EntityId(1)));
        assert_eq!(repository.saves(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_rejected_without_save() {
        let repository = MockRepository::with_records([gadget("gadget-001", 1)]);
        let service = service(&repository);

        let envelope = service.create(body(Some("Gadget-001"), Some(9))).await;
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.exception.as_deref(), Some("AlreadyExistsError"));
        assert_eq!(
            envelope.message,
            "A gadget with the requested reference GADGET-001 already exists"
        );
        assert_eq!(repository.saves(), 0);
        assert_eq!(repository.records()[0].available, Some(1));
    }

    #[tokio::test]
    async fn test_mutations_on_missing_record_are_404() {
        let repository = MockRepository::new();
        let service = service(&repository);

        let envelopes = [
            service.replace(Some("gadget-404"), body(None, Some(1))).await,
            service.patch(Some("gadget-404"), body(None, Some(1))).await,
            service.delete(Some("gadget-404")).await,
            service.perform(Some("gadget-404"), GadgetAction::Retire).await,
        ];
        for envelope in envelopes {
            assert_eq!(envelope.status, 404);
            assert_eq!(envelope.path, "/gadgets/GADGET-404");
            assert_eq!(envelope.exception.as_deref(), Some("NotFoundError"));
        }
        assert_eq!(repository.saves(), 0);
    }

    #[tokio::test]
    async fn test_patch_keeps_omitted_fields() {
        let mut stored = gadget("gadget-001", 5);
        stored.price = Some(7.5);
        let repository = MockRepository::with_records([stored]);
        let service = service(&repository);

        let envelope = service.patch(Some("gadget-001"), body(None, Some(8))).await;
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.message, "Partial update successful");
        let saved = envelope.payload.unwrap();
        assert_eq!(saved.available, Some(8));
        assert_eq!(saved.price, Some(7.5));
    }

    #[tokio::test]
    async fn test_replace_overwrites_body_reference_and_keeps_id() {
        let repository = MockRepository::with_records([gadget("gadget-001", 5)]);
        let service = service(&repository);

        let envelope = service
            .replace(Some("gadget-001"), body(Some("other-ref"), Some(2)))
            .await;
        assert_eq!(envelope.status, 200);
        let saved = envelope.payload.unwrap();
        assert_eq!(saved.reference.as_str(), "GADGET-001");
        assert_eq!(saved.id, Some(EntityId(1)));
        assert_eq!(saved.price, None);
        assert_eq!(repository.records().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let repository = MockRepository::with_records([gadget("gadget-001", 5)]);
        let service = service(&repository);

        let envelope = service.delete(Some("gadget-001")).await;
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.message, "Deletion successful");
        assert_eq!(envelope.payload.unwrap().available, Some(5));
        assert!(repository.records().is_empty());
        assert!(repository
            .calls()
            .contains(&RepositoryCall::Delete(EntityId(1))));
    }

    #[tokio::test]
    async fn test_perform_action() {
        let repository = MockRepository::with_records([gadget("gadget-001", 5)]);
        let service = service(&repository);

        let envelope = service.perform(Some("gadget-001"), GadgetAction::Retire).await;
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.message, "Operation successful");
        assert!(envelope.payload.unwrap().retired);
    }

    #[tokio::test]
    async fn test_storage_failure_is_wrapped() {
        let repository = MockRepository::new();
        repository.fail_next_save(StoreError::ConstraintViolation {
            entity: "gadget",
            violations: vec![FieldViolation::new("available", "must be between 0 and 100")],
        });
        let service = service(&repository);

        let envelope = service.create(body(Some("gadget-001"), Some(1))).await;
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.message, "'available': must be between 0 and 100");
        assert_eq!(envelope.exception.as_deref(), Some("ValidationError"));
        let problems = envelope.problems();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].exception, "UnknownError");
        assert_eq!(
            problems[0].message,
            "Could not persist the gadget GADGET-001"
        );
        assert_eq!(problems[1].exception, "ValidationError");
    }

    #[tokio::test]
    async fn test_reads() {
        let repository =
            MockRepository::with_records([gadget("gadget-001", 1), gadget("gadget-002", 30)]);
        let service = service(&repository);

        let found = service.get(Some("gadget-002")).await.unwrap();
        assert_eq!(found.available, Some(30));

        let missing = service.get(Some("gadget-404")).await.unwrap_err();
        assert_eq!(missing.status, 404);
        assert_eq!(missing.path, "/gadgets/GADGET-404");

        assert_eq!(service.list_all().await.unwrap().len(), 2);
        let filtered = service
            .list(GadgetFilter { min_available: 10 })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);

        let none = service
            .list(GadgetFilter { min_available: 99 })
            .await
            .unwrap_err();
        assert_eq!(none.status, 404);
        assert_eq!(none.path, "/gadgets");
        assert_eq!(
            none.message,
            "No existing gadget for the requested parameters"
        );
    }
}
