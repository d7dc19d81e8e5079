//! Garden API client: projects, plants and photo uploads.
//!
//! Every endpoint needs a bearer token; calls without one fail with
//! [`ApiError::Unauthorized`] before anything is sent.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use sylva_core::ApiError;
use sylva_core::ports::{ApiRequest, FilePart, HttpTransport, RequestContext, path_segment};
use sylva_shared::garden::{Plant, PlantInput, Project, ProjectInput, UploadedFile};

use crate::envelope::{unwrap_response, unwrap_response_strict};

#[derive(Clone)]
pub struct GardenClient {
    transport: Arc<dyn HttpTransport>,
    strict: bool,
}

impl GardenClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            strict: false,
        }
    }

    /// Require the `{ data }` envelope on every response instead of
    /// falling back to the raw body.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    // Projects

    pub async fn projects(&self, ctx: &RequestContext) -> Result<Vec<Project>, ApiError> {
        self.call(ctx, ApiRequest::get("/projects")).await
    }

    pub async fn project(&self, ctx: &RequestContext, id: &str) -> Result<Project, ApiError> {
        self.call(ctx, ApiRequest::get(item_path("/projects", id)?)).await
    }

    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        self.call(ctx, ApiRequest::post("/projects").json(input)?)
            .await
    }

    pub async fn update_project(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        self.call(ctx, ApiRequest::put(item_path("/projects", id)?).json(input)?)
            .await
    }

    pub async fn delete_project(&self, ctx: &RequestContext, id: &str) -> Result<(), ApiError> {
        self.call_empty(ctx, ApiRequest::delete(item_path("/projects", id)?))
            .await
    }

    // Plants

    pub async fn plants(
        &self,
        ctx: &RequestContext,
        project_id: Option<&str>,
    ) -> Result<Vec<Plant>, ApiError> {
        self.call(ctx, ApiRequest::get("/plants").query_opt("projectId", project_id))
            .await
    }

    pub async fn plant(&self, ctx: &RequestContext, id: &str) -> Result<Plant, ApiError> {
        self.call(ctx, ApiRequest::get(item_path("/plants", id)?)).await
    }

    pub async fn create_plant(
        &self,
        ctx: &RequestContext,
        input: &PlantInput,
    ) -> Result<Plant, ApiError> {
        self.call(ctx, ApiRequest::post("/plants").json(input)?).await
    }

    pub async fn update_plant(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: &PlantInput,
    ) -> Result<Plant, ApiError> {
        self.call(ctx, ApiRequest::put(item_path("/plants", id)?).json(input)?)
            .await
    }

    pub async fn delete_plant(&self, ctx: &RequestContext, id: &str) -> Result<(), ApiError> {
        self.call_empty(ctx, ApiRequest::delete(item_path("/plants", id)?))
            .await
    }

    // Uploads

    /// POST /upload as multipart form data.
    pub async fn upload(&self, ctx: &RequestContext, file: FilePart) -> Result<UploadedFile, ApiError> {
        self.call(ctx, ApiRequest::post("/upload").multipart(file))
            .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        if !ctx.is_authenticated() {
            return Err(ApiError::Unauthorized);
        }
        let response = self.transport.send(request.context(ctx)).await?;
        if self.strict {
            unwrap_response_strict(response)
        } else {
            unwrap_response(response)
        }
    }

    /// Deletes answer 204 or an envelope; the body is ignored either way.
    async fn call_empty(&self, ctx: &RequestContext, request: ApiRequest) -> Result<(), ApiError> {
        if !ctx.is_authenticated() {
            return Err(ApiError::Unauthorized);
        }
        let response = self.transport.send(request.context(ctx)).await?;
        unwrap_response::<serde_json::Value>(response).map(|_| ())
    }
}

fn item_path(collection: &str, id: &str) -> Result<String, ApiError> {
    Ok(format!("{collection}/{}", path_segment(id)?))
}
