use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    kit_client::KitReply,
    web::{
        data::{DeserSubscription, ValidSubscription},
        Error, Result,
    },
    AppState,
};

/// Forwards a subscription form submission to Kit and relays the verdict back
/// to the caller. Every failure renders as a JSON response, see `web::Error`.
#[tracing::instrument(
    name = "Forwarding new subscriber to Kit",
    skip(app_state, subscription),
    fields(subscriber_email = subscription.email.as_deref().unwrap_or_default())
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    Json(subscription): Json<DeserSubscription>,
) -> Result<(StatusCode, Json<Value>)> {
    let subscription: ValidSubscription = subscription.try_into()?;

    let Some(credentials) = app_state.kit_credentials.as_ref() else {
        error!("KIT_FORM_ID or KIT_API_KEY environment variable is not set");
        return Err(Error::MissingCredentials);
    };

    let reply = app_state
        .kit_client
        .subscribe(credentials, &subscription)
        .await?;

    relay_reply(reply)
}

/// Maps Kit's reply onto this service's response contract.
fn relay_reply(reply: KitReply) -> Result<(StatusCode, Json<Value>)> {
    let KitReply {
        status,
        body: mut reply_body,
    } = reply;

    if !status.is_success() {
        return Err(Error::SubscribeRejected {
            status,
            details: reply_body,
        });
    }

    // Kit can report success without creating a subscription, e.g. when the
    // form rejects the address.
    let subscription = match reply_body
        .get_mut("subscription")
        .filter(|sub| !sub.is_null())
    {
        Some(subscription) => subscription.take(),
        None => {
            return Err(Error::SubscriptionNotCreated {
                details: reply_body,
            })
        }
    };

    let subscriber_email = subscription
        .pointer("/subscriber/email_address")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>");
    info!("Subscriber added successfully: {subscriber_email}");

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "subscription": subscription })),
    ))
}
