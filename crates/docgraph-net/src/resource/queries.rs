//! GraphQL documents for the resource operations.

pub(crate) const GET_SINGLE_DATA: &str = r#"
query GetSingleData($model: String, $_id: String!, $single_page_data: Boolean) {
    getSingleData(model: $model, _id: $_id, single_page_data: $single_page_data) {
        _key
        data
        meta {
            created_at
            updated_at
            status
            revision
            revision_at
        }
        id
        expire_at
        relation_doc_id
        type
    }
}
"#;

pub(crate) const GET_MODEL_DATA: &str = r#"
query GetModelData($model: String!, $page: Int, $limit: Int, $where: JSON, $search: String) {
    getModelData(model: $model, page: $page, limit: $limit, where: $where, search: $search) {
        results {
            id
            relation_doc_id
            data
            type
            expire_at
            meta {
                created_at
                updated_at
                status
                root_revision_id
            }
        }
        count
    }
}
"#;

pub(crate) const GET_RELATION_DATA: &str = r#"
query GetModelData($model: String!, $page: Int, $limit: Int, $where: JSON, $search: String, $connection: ListAllDataDetailedOfAModelConnectionPayload) {
    getModelData(model: $model, page: $page, limit: $limit, where: $where, search: $search, connection: $connection) {
        results {
            id
            relation_doc_id
            data
            type
            expire_at
            meta {
                created_at
                updated_at
                status
                root_revision_id
            }
        }
        count
    }
}
"#;

pub(crate) const CREATE_DATA: &str = r#"
mutation CreateNewData($model: String!, $single_page_data: Boolean, $payload: JSON!, $connect: JSON) {
    upsertModelData(
        connect: $connect
        model_name: $model
        single_page_data: $single_page_data
        payload: $payload
    ) {
        id
        type
        data
        meta {
            created_at
            updated_at
            status
            revision
            revision_at
        }
    }
}
"#;

pub(crate) const UPDATE_DATA: &str = r#"
mutation UpdateModelData($_id: String!, $model: String!, $single_page_data: Boolean, $force_update: Boolean, $payload: JSON!, $connect: JSON, $disconnect: JSON) {
    upsertModelData(
        connect: $connect
        model_name: $model
        single_page_data: $single_page_data
        force_update: $force_update
        disconnect: $disconnect
        _id: $_id
        payload: $payload
    ) {
        id
        type
        data
        meta {
            created_at
            updated_at
            status
            revision
            revision_at
        }
    }
}
"#;

pub(crate) const DELETE_DATA: &str = r#"
mutation DeleteData($model: String!, $_id: String!) {
    deleteModelData(model_name: $model, _id: $_id) {
        id
    }
}
"#;

pub(crate) const SEND_AUDIT_LOG: &str = r#"
mutation SendAuditLog($auditData: JSON!) {
    sendAuditLog(auditData: $auditData) {
        message
    }
}
"#;

pub(crate) const DEBUG: &str = r#"
mutation Debug($stage: String!, $data: JSON) {
    debug(stage: $stage, data: $data) {
        message
        data
    }
}
"#;

pub(crate) const GENERATE_TENANT_TOKEN: &str = r#"
mutation GenerateTenantToken($token: String!, $tenantId: String!) {
    generateTenantToken(token: $token, tenant_id: $tenantId) {
        token
    }
}
"#;
