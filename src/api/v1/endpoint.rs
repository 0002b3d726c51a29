/*
 * Responsibility
 * - One variant per v1 domain operation (the handler reference a route rule
 *   points at)
 * - Stable names for logging and scaffold responses
 */
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Hello,

    // auth
    SignUp,
    SignIn,
    Profile,

    // catalogue (public)
    PopularDishes,
    Locations,
    LocationFeedbacks,
    LocationSpecialityDishes,
    LocationSelectOptions,
    Dishes,
    Dish,
    VisitorFeedbacks,
    AvailableTables,

    // admin
    CreateWaiter,
    RemoveWaiter,
    UpdateBooking,

    // reservations / bookings
    Reservations,
    WaiterReservations,
    AvailableDishes,
    OrderDish,
    CreateClientBooking,
    CreateWaiterBooking,
    UpdateClientBooking,
    CancelReservation,

    // feedback
    Feedback,
    CreateFeedback,
    UpdateFeedback,

    // cart
    Cart,
    UpdateCart,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Hello => "hello",
            Endpoint::SignUp => "sign_up",
            Endpoint::SignIn => "sign_in",
            Endpoint::Profile => "profile",
            Endpoint::PopularDishes => "popular_dishes",
            Endpoint::Locations => "locations",
            Endpoint::LocationFeedbacks => "location_feedbacks",
            Endpoint::LocationSpecialityDishes => "location_speciality_dishes",
            Endpoint::LocationSelectOptions => "location_select_options",
            Endpoint::Dishes => "dishes",
            Endpoint::Dish => "dish",
            Endpoint::VisitorFeedbacks => "visitor_feedbacks",
            Endpoint::AvailableTables => "available_tables",
            Endpoint::CreateWaiter => "create_waiter",
            Endpoint::RemoveWaiter => "remove_waiter",
            Endpoint::UpdateBooking => "update_booking",
            Endpoint::Reservations => "reservations",
            Endpoint::WaiterReservations => "waiter_reservations",
            Endpoint::AvailableDishes => "available_dishes",
            Endpoint::OrderDish => "order_dish",
            Endpoint::CreateClientBooking => "create_client_booking",
            Endpoint::CreateWaiterBooking => "create_waiter_booking",
            Endpoint::UpdateClientBooking => "update_client_booking",
            Endpoint::CancelReservation => "cancel_reservation",
            Endpoint::Feedback => "feedback",
            Endpoint::CreateFeedback => "create_feedback",
            Endpoint::UpdateFeedback => "update_feedback",
            Endpoint::Cart => "cart",
            Endpoint::UpdateCart => "update_cart",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
