use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{admin, appointments, auth, board, contact, rentals, vehicles, wishlist};
use crate::middleware::auth::{auth_middleware, require_admin, require_seller};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::role_rate_limit::{create_role_governor, RateLimitedRole};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Create role-specific governor layers
    let buyer_governor = create_role_governor(RateLimitedRole::Buyer);
    let seller_governor = create_role_governor(RateLimitedRole::Seller);
    // Create IP-based governor for public routes
    let public_governor = create_public_governor();

    // Public routes (with IP-based rate limiting)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    // Public browsing routes (sale listings, rental fleet, lost & found board)
    let public_routes = Router::new()
        .route("/vehicles", get(vehicles::list_vehicles))
        .route("/vehicles/{id}", get(vehicles::get_vehicle))
        .route("/rentals", get(rentals::list_rental_vehicles))
        .route("/rentals/{id}", get(rentals::get_rental_vehicle))
        .route("/board", get(board::list_reports))
        .route("/contact", post(contact::submit_message))
        .layer(public_governor);

    // Appointment workflow (requires auth; the list-all handler checks admin)
    let appointment_routes = Router::new()
        .route("/", post(appointments::create_appointment))
        .route("/", get(appointments::list_all_appointments))
        .route("/user/{user_id}", get(appointments::list_user_appointments))
        .route("/{id}/status", patch(appointments::transition_appointment))
        .layer(buyer_governor.clone())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Rental booking workflow (requires auth; dashboards and status updates
    // check admin in the handler)
    let rent_routes = Router::new()
        .route("/", post(rentals::create_booking))
        .route("/active/all", get(rentals::list_active_bookings))
        .route("/history/all", get(rentals::list_booking_history))
        .route("/cancel/{id}", put(rentals::cancel_booking))
        .route("/update/{id}", put(rentals::update_booking_status))
        .layer(buyer_governor.clone())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Wishlist (requires auth)
    let wishlist_routes = Router::new()
        .route("/", get(wishlist::my_wishlist))
        .route("/", post(wishlist::save_vehicle))
        .route("/{vehicle_id}", delete(wishlist::remove_vehicle))
        .layer(buyer_governor.clone())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Lost & found report management (requires auth; listing is public above)
    let board_routes = Router::new()
        .route("/reports", post(board::create_report))
        .route("/reports/{id}/resolve", put(board::resolve_report))
        .route("/reports/{id}", delete(board::delete_report))
        .layer(buyer_governor)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Seller listing management (requires auth + seller role)
    let seller_routes = Router::new()
        .route("/vehicles", post(vehicles::create_vehicle))
        .route("/vehicles/{id}", put(vehicles::update_vehicle))
        .route("/vehicles/{id}", delete(vehicles::delete_vehicle))
        .route("/vehicles/{id}/sold", put(vehicles::mark_sold))
        .layer(seller_governor)
        .layer(middleware::from_fn(require_seller))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        // User management
        .route("/users", get(admin::list_users))
        .route("/users/{id}/verify", put(admin::verify_user))
        .route("/users/{id}", delete(admin::delete_user))
        // Listing moderation
        .route("/vehicles/{id}", delete(admin::remove_listing))
        // Contact inbox
        .route("/messages", get(admin::list_messages))
        // Rental fleet management
        .route("/rentals", post(admin::create_rental_vehicle))
        .route("/rentals/{id}", put(admin::update_rental_vehicle))
        .route("/rentals/{id}", delete(admin::delete_rental_vehicle))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/appointments", appointment_routes)
        .nest("/api/wishlist", wishlist_routes)
        .nest("/api/board", board_routes)
        .nest("/api/seller", seller_routes)
        .nest("/api/admin", admin_routes)
        .nest("/rent", rent_routes)
        .with_state(state)
}
