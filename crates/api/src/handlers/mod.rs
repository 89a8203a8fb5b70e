pub mod auth;
pub mod booking;
pub mod client;
pub mod room;

use roomdesk_core::listing::ListRequest;

/// Every query parameter other than `offset`, `limit`, `sort_by` and
/// `sort_order` is an equality filter.
pub(crate) fn list_request(params: Vec<(String, String)>) -> ListRequest {
    ListRequest::from_query_pairs(params)
}
