// handlers/protected/records.rs - create/edit/delete for jobs and departments
//
// The handlers are generic over the submitted form; the router instantiates
// them once per record kind:
//
//   /add_job, /edit_job/:id, /job_delete/:id                      → JobForm
//   /add_department, /edit_department/:id, /delete_department/:id → DepartmentForm

use axum::{
    extract::{Path, State},
    Extension,
};
use serde::de::DeserializeOwned;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::database::models::{Department, Job, OwnedRecord};
use crate::database::{RecordStore, Store};
use crate::forms::{DepartmentForm, FormDescriptor, JobForm, DEPARTMENT_FORM, JOB_FORM};
use crate::middleware::{ApiResponse, ApiResult, FormInput};
use crate::services::{RecordService, ServiceError};

/// A submitted form that produces the fields of one record kind
pub trait RecordForm: DeserializeOwned + Send + 'static {
    type Record: OwnedRecord;

    const DESCRIPTOR: FormDescriptor;

    fn into_fields(self) -> Result<<Self::Record as OwnedRecord>::Fields, ServiceError>;
}

impl RecordForm for JobForm {
    type Record = Job;

    const DESCRIPTOR: FormDescriptor = JOB_FORM;

    fn into_fields(self) -> Result<<Job as OwnedRecord>::Fields, ServiceError> {
        self.validated()
    }
}

impl RecordForm for DepartmentForm {
    type Record = Department;

    const DESCRIPTOR: FormDescriptor = DEPARTMENT_FORM;

    fn into_fields(self) -> Result<<Department as OwnedRecord>::Fields, ServiceError> {
        self.validated()
    }
}

/// GET /add_* - describe the creation form
pub async fn create_form<F: RecordForm>() -> ApiResponse<FormDescriptor> {
    ApiResponse::success(F::DESCRIPTOR)
}

/// POST /add_* - validate every field, then insert with the caller as owner
pub async fn create<F>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    FormInput(form): FormInput<F>,
) -> ApiResult<F::Record>
where
    F: RecordForm,
    dyn Store: RecordStore<F::Record>,
{
    let fields = form.into_fields()?;
    let record = RecordService::new(state.store.as_ref())
        .create::<F::Record>(&user, fields)
        .await?;
    Ok(ApiResponse::created(record))
}

/// GET /edit_*/:id - current values of a record the caller may edit
pub async fn edit_form<F>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<F::Record>
where
    F: RecordForm,
    dyn Store: RecordStore<F::Record>,
{
    let record = RecordService::new(state.store.as_ref())
        .fetch_for_edit::<F::Record>(&user, id)
        .await?;
    Ok(ApiResponse::success(record))
}

/// POST /edit_*/:id - overwrite a record the caller may edit
pub async fn update<F>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    FormInput(form): FormInput<F>,
) -> ApiResult<F::Record>
where
    F: RecordForm,
    dyn Store: RecordStore<F::Record>,
{
    let fields = form.into_fields()?;
    let record = RecordService::new(state.store.as_ref())
        .update::<F::Record>(&user, id, fields)
        .await?;
    Ok(ApiResponse::success(record))
}

/// GET|POST /*_delete/:id - remove a record the caller may edit
pub async fn delete<F>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<F::Record>
where
    F: RecordForm,
    dyn Store: RecordStore<F::Record>,
{
    let record = RecordService::new(state.store.as_ref())
        .delete::<F::Record>(&user, id)
        .await?;
    Ok(ApiResponse::success(record))
}
