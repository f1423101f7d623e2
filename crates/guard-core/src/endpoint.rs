//! Outbound request classification.
//!
//! Decides which outgoing messages receive the mandatory post-only bit.
//! HTTP paths match a fixed route table first and fall back to a
//! substring scan, so an order-submission-shaped endpoint the venue adds
//! later is still enforced. Socket message tags match exactly: cancel and
//! calc payloads carry no flags field and must never gain one.

/// Classification of an outbound request or socket input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// New order submission.
    SubmitOrder,
    /// Update of a live order.
    UpdateOrder,
    /// New funding offer submission.
    SubmitFundingOffer,
    /// Everything else: cancellations, calculations, reads.
    Unenforced,
}

impl EndpointKind {
    /// Whether payloads of this kind receive the mandatory post-only bit.
    ///
    /// Order submission and update are always enforced. Funding-offer
    /// submission forwards caller-supplied flags untouched.
    #[must_use]
    pub fn is_enforced(self) -> bool {
        matches!(self, Self::SubmitOrder | Self::UpdateOrder)
    }
}

/// Classifies an HTTP endpoint path.
///
/// Known write routes are matched exactly; unknown paths fall through to
/// the substring scan.
pub fn classify_path(endpoint: &str) -> EndpointKind {
    match endpoint.trim_matches('/') {
        "auth/w/order/submit" => EndpointKind::SubmitOrder,
        "auth/w/order/update" => EndpointKind::UpdateOrder,
        "auth/w/funding/offer/submit" => EndpointKind::SubmitFundingOffer,
        path if path.contains("order/submit") => EndpointKind::SubmitOrder,
        path if path.contains("order/update") => EndpointKind::UpdateOrder,
        path if path.contains("funding/offer/submit") => EndpointKind::SubmitFundingOffer,
        _ => EndpointKind::Unenforced,
    }
}

/// Classifies a socket input message tag.
pub fn classify_input_tag(tag: &str) -> EndpointKind {
    match tag {
        "on" => EndpointKind::SubmitOrder,
        "ou" => EndpointKind::UpdateOrder,
        "fon" => EndpointKind::SubmitFundingOffer,
        _ => EndpointKind::Unenforced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        assert_eq!(
            classify_path("auth/w/order/submit"),
            EndpointKind::SubmitOrder
        );
        assert_eq!(
            classify_path("auth/w/order/update"),
            EndpointKind::UpdateOrder
        );
        assert_eq!(
            classify_path("auth/w/funding/offer/submit"),
            EndpointKind::SubmitFundingOffer
        );
    }

    #[test]
    fn test_substring_fallback_catches_new_routes() {
        // A hypothetical versioned or renamed route still classifies.
        assert_eq!(
            classify_path("auth/w/v3/order/submit"),
            EndpointKind::SubmitOrder
        );
        assert_eq!(
            classify_path("auth/w/order/update/batch"),
            EndpointKind::UpdateOrder
        );
    }

    #[test]
    fn test_untouched_routes() {
        assert_eq!(
            classify_path("auth/w/order/cancel"),
            EndpointKind::Unenforced
        );
        assert_eq!(
            classify_path("auth/w/order/cancel/multi"),
            EndpointKind::Unenforced
        );
        assert_eq!(
            classify_path("auth/w/funding/offer/cancel"),
            EndpointKind::Unenforced
        );
        assert_eq!(classify_path("auth/r/orders"), EndpointKind::Unenforced);
        assert_eq!(classify_path("ticker/tBTCUSD"), EndpointKind::Unenforced);
    }

    #[test]
    fn test_input_tags_exact_match() {
        assert_eq!(classify_input_tag("on"), EndpointKind::SubmitOrder);
        assert_eq!(classify_input_tag("ou"), EndpointKind::UpdateOrder);
        assert_eq!(classify_input_tag("fon"), EndpointKind::SubmitFundingOffer);

        assert_eq!(classify_input_tag("oc"), EndpointKind::Unenforced);
        assert_eq!(classify_input_tag("oc_multi"), EndpointKind::Unenforced);
        assert_eq!(classify_input_tag("foc"), EndpointKind::Unenforced);
        assert_eq!(classify_input_tag("calc"), EndpointKind::Unenforced);
        // No substring behavior on tags.
        assert_eq!(classify_input_tag("on_multi"), EndpointKind::Unenforced);
    }

    #[test]
    fn test_enforcement_policy() {
        assert!(EndpointKind::SubmitOrder.is_enforced());
        assert!(EndpointKind::UpdateOrder.is_enforced());
        assert!(!EndpointKind::SubmitFundingOffer.is_enforced());
        assert!(!EndpointKind::Unenforced.is_enforced());
    }
}
