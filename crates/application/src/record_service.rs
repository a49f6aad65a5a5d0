use std::marker::PhantomData;
use std::sync::Arc;

use opsdesk_core::{AppError, AppResult, RecordId};
use opsdesk_domain::{
    FormContext, FormMode, RecordForm, TablePage, TableQuery, TableRecord, apply_table_query,
};
use tracing::info;

use crate::RecordRepository;

/// Table, form and delete operations for one back-office collection.
///
/// The service is generic over the collection's add/edit form; the record
/// type follows from [`RecordForm::Record`].
pub struct RecordService<F: RecordForm> {
    repository: Arc<dyn RecordRepository<F::Record>>,
    form: PhantomData<fn() -> F>,
}

impl<F: RecordForm> Clone for RecordService<F> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            form: PhantomData,
        }
    }
}

impl<F: RecordForm> RecordService<F> {
    /// Creates a service over one collection.
    #[must_use]
    pub fn new(repository: Arc<dyn RecordRepository<F::Record>>) -> Self {
        Self {
            repository,
            form: PhantomData,
        }
    }

    /// Runs a table query over the whole collection.
    pub async fn list(&self, query: &TableQuery) -> AppResult<TablePage<F::Record>> {
        let records = self.repository.list_all().await?;
        apply_table_query(&records, query)
    }

    /// Returns one record.
    pub async fn get(&self, id: &RecordId) -> AppResult<F::Record> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| not_found::<F::Record>(id))
    }

    /// Returns the edit-mode form pre-filled from one record.
    pub async fn edit_form(&self, id: &RecordId) -> AppResult<F> {
        let record = self.get(id).await?;
        Ok(F::from_record(&record))
    }

    /// Validates a create-mode form and stores the new record.
    ///
    /// An invalid form is rejected with [`AppError::InvalidForm`] before the
    /// collection is touched.
    pub async fn create(&self, form: F, operator: &str) -> AppResult<F::Record> {
        form.validate(FormMode::Create)?;

        let id = RecordId::generate();
        let record = form.into_record(id.clone(), &FormContext::now(operator))?;
        self.repository.insert(record.clone()).await?;

        info!(
            table = F::Record::TABLE,
            record_id = %id,
            operator,
            "record created"
        );
        Ok(record)
    }

    /// Validates an edit-mode form and writes it onto an existing record.
    pub async fn update(&self, id: &RecordId, form: F, operator: &str) -> AppResult<F::Record> {
        let mut record = self.get(id).await?;
        form.validate(FormMode::Edit)?;

        form.apply_to(&mut record, &FormContext::now(operator))?;
        self.repository.replace(record.clone()).await?;

        info!(
            table = F::Record::TABLE,
            record_id = %id,
            operator,
            "record updated"
        );
        Ok(record)
    }

    /// Removes one record.
    pub async fn delete(&self, id: &RecordId, operator: &str) -> AppResult<F::Record> {
        let removed = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| not_found::<F::Record>(id))?;

        info!(
            table = F::Record::TABLE,
            record_id = %id,
            operator,
            "record deleted"
        );
        Ok(removed)
    }
}

pub(crate) fn not_found<T: TableRecord>(id: &RecordId) -> AppError {
    AppError::NotFound(format!("{} '{}' does not exist", T::LABEL, id))
}
