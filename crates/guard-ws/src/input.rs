//! Typed socket input dispatch.
//!
//! One method per outbound message family. The classification table in
//! `guard-core` decides which tags are enforced: order submission and
//! update route their flags through the shared post-only enforcer before
//! the payload leaves the process, funding offers forward caller flags
//! untouched, and cancel/calc payloads never gain a flags field.

use guard_core::{classify_input_tag, enforce_post_only};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::WsInputResult;
use crate::outbound::{DynInputSender, InputEnvelope};

const TAG_SUBMIT_ORDER: &str = "on";
const TAG_UPDATE_ORDER: &str = "ou";
const TAG_CANCEL_ORDER: &str = "oc";
const TAG_CANCEL_ORDER_MULTI: &str = "oc_multi";
const TAG_SUBMIT_FUNDING_OFFER: &str = "fon";
const TAG_CANCEL_FUNDING_OFFER: &str = "foc";
const TAG_CALC: &str = "calc";

/// Arguments for a new order submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOrder {
    /// Matching style, e.g. "LIMIT" or "EXCHANGE LIMIT".
    #[serde(rename = "type")]
    pub order_type: String,
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lev: Option<u32>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_trailing: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_aux_limit: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_oco_stop: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<i64>,
    /// Always present after enforcement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tif: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl SubmitOrder {
    /// A limit order with only the required fields set.
    pub fn new(
        order_type: impl Into<String>,
        symbol: impl Into<String>,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            order_type: order_type.into(),
            symbol: symbol.into(),
            amount,
            price,
            lev: None,
            price_trailing: None,
            price_aux_limit: None,
            price_oco_stop: None,
            gid: None,
            cid: None,
            flags: None,
            tif: None,
            meta: None,
        }
    }
}

/// Arguments for updating a live order.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrder {
    pub id: u64,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<i64>,
    /// Always present after enforcement, even when the caller set none:
    /// a flags-less update must not slip past the post-only guarantee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lev: Option<u32>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delta: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_aux_limit: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_trailing: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tif: Option<String>,
}

impl UpdateOrder {
    /// An update touching nothing but the order id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            amount: None,
            price: None,
            cid: None,
            cid_date: None,
            gid: None,
            flags: None,
            lev: None,
            delta: None,
            price_aux_limit: None,
            price_trailing: None,
            tif: None,
        }
    }
}

/// Arguments for cancelling one order, by id or by cid + cid_date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid_date: Option<String>,
}

/// Arguments for cancelling a batch of orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelOrderMulti {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<Vec<(i64, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}

/// Arguments for a new funding offer.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitFundingOffer {
    /// Offer style, e.g. "LIMIT" or "FRRDELTAVAR".
    #[serde(rename = "type")]
    pub offer_type: String,
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub period: u8,
    /// Forwarded untouched; omitted entirely when not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

impl SubmitFundingOffer {
    pub fn new(
        offer_type: impl Into<String>,
        symbol: impl Into<String>,
        amount: Decimal,
        rate: Decimal,
        period: u8,
    ) -> Self {
        Self {
            offer_type: offer_type.into(),
            symbol: symbol.into(),
            amount,
            rate,
            period,
            flags: None,
        }
    }
}

/// Typed input dispatcher over an outbound send primitive.
///
/// Each call builds an independent payload; the dispatcher holds no
/// mutable state, so concurrent calls cannot interleave enforcement.
pub struct InputDispatcher {
    sender: DynInputSender,
}

impl InputDispatcher {
    /// Creates a dispatcher over the given send primitive.
    pub fn new(sender: DynInputSender) -> Self {
        Self { sender }
    }

    /// Submits a new order. The dispatched payload always carries the
    /// post-only bit.
    ///
    /// # Errors
    ///
    /// Rejects market-style order types before anything is dispatched;
    /// otherwise only the transport can fail.
    pub async fn submit_order(&self, mut order: SubmitOrder) -> WsInputResult<()> {
        order.flags = enforced_flags(TAG_SUBMIT_ORDER, order.flags, Some(&order.order_type))?;
        debug!(symbol = %order.symbol, flags = ?order.flags, "submitting order");
        self.dispatch(TAG_SUBMIT_ORDER, &order).await
    }

    /// Updates a live order. Even a flags-less update dispatches with
    /// the post-only bit set.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn update_order(&self, mut update: UpdateOrder) -> WsInputResult<()> {
        update.flags = enforced_flags(TAG_UPDATE_ORDER, update.flags, None)?;
        debug!(id = update.id, flags = ?update.flags, "updating order");
        self.dispatch(TAG_UPDATE_ORDER, &update).await
    }

    /// Cancels one order. The payload is forwarded untouched.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn cancel_order(&self, cancel: CancelOrder) -> WsInputResult<()> {
        self.dispatch(TAG_CANCEL_ORDER, &cancel).await
    }

    /// Cancels a batch of orders. The payload is forwarded untouched.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn cancel_order_multi(&self, cancel: CancelOrderMulti) -> WsInputResult<()> {
        self.dispatch(TAG_CANCEL_ORDER_MULTI, &cancel).await
    }

    /// Submits a funding offer. Flags are forwarded as supplied.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn submit_funding_offer(&self, mut offer: SubmitFundingOffer) -> WsInputResult<()> {
        offer.flags = enforced_flags(TAG_SUBMIT_FUNDING_OFFER, offer.flags, None)?;
        debug!(symbol = %offer.symbol, flags = ?offer.flags, "submitting funding offer");
        self.dispatch(TAG_SUBMIT_FUNDING_OFFER, &offer).await
    }

    /// Cancels a funding offer.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn cancel_funding_offer(&self, id: u64) -> WsInputResult<()> {
        self.dispatch(TAG_CANCEL_FUNDING_OFFER, &json!({ "id": id }))
            .await
    }

    /// Requests venue-side recalculation of the given targets, e.g.
    /// `["position_tBTCUSD", "balance"]`.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn calc(&self, targets: &[&str]) -> WsInputResult<()> {
        let payload = Value::Array(targets.iter().map(|target| json!([target])).collect());
        self.sender
            .send(InputEnvelope {
                tag: TAG_CALC,
                payload,
            })
            .await
    }

    async fn dispatch<T: Serialize>(&self, tag: &'static str, payload: &T) -> WsInputResult<()> {
        let payload = serde_json::to_value(payload)?;
        self.sender.send(InputEnvelope { tag, payload }).await
    }
}

/// Routes flags through the enforcer when the tag's classification says
/// so, and forwards them untouched otherwise.
fn enforced_flags(
    tag: &str,
    flags: Option<u32>,
    order_type: Option<&str>,
) -> WsInputResult<Option<u32>> {
    if classify_input_tag(tag).is_enforced() {
        Ok(Some(enforce_post_only(flags, order_type)?))
    } else {
        Ok(flags)
    }
}
