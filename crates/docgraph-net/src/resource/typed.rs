//! Typed variants of the document operations.

use docgraph_core::{TypedDocument, TypedSearchResult, convert_document, convert_search_result};
use serde::de::DeserializeOwned;

use super::{CreateAndUpdateRequest, DocgraphClient, RelationConnection, SearchFilter};
use crate::context::RequestContext;
use crate::error::Result;

impl DocgraphClient {
    /// Fetch one document and convert its payload to `T`.
    pub async fn get_single_resource_typed<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        model: &str,
        id: &str,
        single_page_data: bool,
    ) -> Result<TypedDocument<T>> {
        let document = self
            .get_single_resource(ctx, model, id, single_page_data)
            .await?;
        Ok(convert_document(&document)?)
    }

    /// Search a model and convert every payload to `T`.
    ///
    /// Fails if any document fails to convert; the error carries its index.
    pub async fn search_resources_typed<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        model: &str,
        filter: &SearchFilter,
    ) -> Result<TypedSearchResult<T>> {
        let result = self.search_resources(ctx, model, filter).await?;
        Ok(convert_search_result(&result)?)
    }

    /// Fetch related documents and convert every payload to `T`.
    pub async fn get_relation_documents_typed<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        id: &str,
        connection: &RelationConnection,
    ) -> Result<TypedSearchResult<T>> {
        let result = self.get_relation_documents(ctx, id, connection).await?;
        Ok(convert_search_result(&result)?)
    }

    /// Create a document and convert the stored payload to `T`.
    pub async fn create_new_resource_typed<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: &CreateAndUpdateRequest,
    ) -> Result<TypedDocument<T>> {
        let document = self.create_new_resource(ctx, request).await?;
        Ok(convert_document(&document)?)
    }

    /// Update a document and convert the stored payload to `T`.
    pub async fn update_resource_typed<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: &CreateAndUpdateRequest,
    ) -> Result<TypedDocument<T>> {
        let document = self.update_resource(ctx, request).await?;
        Ok(convert_document(&document)?)
    }
}
