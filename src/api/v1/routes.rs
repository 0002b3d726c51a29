/*
 * Responsibility
 * - v1 の URL 構造を定義 (method, path pattern, protected flag, endpoint)
 * - Declaration order is evaluation order: literal paths go before the
 *   wildcard paths that would otherwise capture them
 *   (/v1/dishes/popular before /v1/dishes/{id},
 *    /v1/feedbacks/visitor before /v1/feedbacks/{id})
 */
use axum::http::Method;

use crate::api::v1::Endpoint;
use crate::routing::{RouteRule, RouteTable};

/// What a matched rule resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Endpoint(Endpoint),
    /// Answers 405 instead of falling through to 404.
    MethodNotAllowed,
}

fn public(method: Method, pattern: &str, endpoint: Endpoint) -> RouteRule<RouteTarget> {
    RouteRule::new(method, pattern, RouteTarget::Endpoint(endpoint))
}

fn protected(method: Method, pattern: &str, endpoint: Endpoint) -> RouteRule<RouteTarget> {
    public(method, pattern, endpoint).protected()
}

pub fn routes() -> RouteTable<RouteTarget> {
    use Endpoint::*;
    use Method as M;

    RouteTable::new(vec![
        public(M::GET, "/v1/hello", Hello),
        public(M::POST, "/v1/auth/sign-up", SignUp),
        public(M::POST, "/v1/auth/sign-in", SignIn),
        public(M::GET, "/v1/dishes/popular", PopularDishes),
        public(M::GET, "/v1/locations", Locations),
        public(M::GET, "/v1/locations/{id}/feedbacks", LocationFeedbacks),
        public(M::GET, "/v1/locations/{id}/speciality-dishes", LocationSpecialityDishes),
        public(M::GET, "/v1/location/select-options", LocationSelectOptions),
        // Only this path answers a wrong method with 405; everywhere else it is 404.
        RouteRule::any_method("/v1/location/select-options", RouteTarget::MethodNotAllowed),
        public(M::GET, "/v1/dishes", Dishes),
        public(M::GET, "/v1/dishes/{id}", Dish),
        public(M::GET, "/v1/feedbacks/visitor", VisitorFeedbacks),
        public(M::GET, "/v1/bookings/tables", AvailableTables),
        // admin
        public(M::POST, "/v1/create-waiter", CreateWaiter),
        public(M::POST, "/v1/remove-waiter", RemoveWaiter),
        public(M::PUT, "/v1/update-booking", UpdateBooking),
        // protected
        protected(M::GET, "/v1/auth/profile", Profile),
        protected(M::GET, "/v1/reservations", Reservations),
        protected(M::GET, "/v1/cart", Cart),
        protected(M::GET, "/v1/reservations-by-waiter", WaiterReservations),
        protected(M::GET, "/v1/feedbacks/{id}", Feedback),
        protected(M::GET, "/v1/reservations/{id}/available-dishes", AvailableDishes),
        protected(M::POST, "/v1/bookings/client", CreateClientBooking),
        protected(M::POST, "/v1/reservations/{id}/order/{dishId}", OrderDish),
        protected(M::POST, "/v1/bookings/waiter", CreateWaiterBooking),
        protected(M::POST, "/v1/feedbacks", CreateFeedback),
        protected(M::PUT, "/v1/bookings/client/{id}", UpdateClientBooking),
        protected(M::PUT, "/v1/feedbacks/update", UpdateFeedback),
        protected(M::PUT, "/v1/cart", UpdateCart),
        protected(M::DELETE, "/v1/reservations/{id}", CancelReservation),
    ])
}
