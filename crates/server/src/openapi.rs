use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema, Serialize)]
pub struct AccountInputDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub person_name: String,
    pub address: String,
}

#[derive(ToSchema, Serialize)]
pub struct AccountDoc {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub person_name: String,
    pub address: String,
}

#[derive(ToSchema)]
pub struct AccountCreatedDoc { pub message: String, pub account_id: i64 }

#[derive(ToSchema)]
pub struct PaymentInputDoc {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount_in_euros: i64,
    /// ISO-8601 calendar date, `YYYY-MM-DD`
    #[schema(example = "2024-06-01")]
    pub payment_date: String,
}

#[derive(ToSchema)]
pub struct PaymentDoc {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount_in_euros: i64,
    #[schema(example = "2024-06-01")]
    pub payment_date: String,
}

#[derive(ToSchema)]
pub struct PaymentCreatedDoc { pub message: String, pub payment_id: i64 }

#[derive(ToSchema)]
pub struct ReportEntryDoc {
    pub from_person_name: String,
    pub to_person_name: String,
    pub amount_in_euros: i64,
    #[schema(example = "2024-06-01")]
    pub payment_date: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::accounts::create_account,
        crate::routes::accounts::list_accounts,
        crate::routes::accounts::get_account,
        crate::routes::accounts::delete_account,
        crate::routes::payments::create_payment,
        crate::routes::payments::list_payments,
        crate::routes::payments::get_payment,
        crate::routes::report::get_report,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MessageDoc,
            AccountInputDoc,
            AccountDoc,
            AccountCreatedDoc,
            PaymentInputDoc,
            PaymentDoc,
            PaymentCreatedDoc,
            ReportEntryDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts"),
        (name = "payments"),
        (name = "report")
    )
)]
pub struct ApiDoc;
