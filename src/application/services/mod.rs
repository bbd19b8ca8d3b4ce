//! Business logic services for the application layer.

pub mod availability_service;
pub mod car_service;
pub mod customer_service;
pub mod dealer_service;
pub mod reservation_service;

pub use availability_service::AvailabilityService;
pub use car_service::CarService;
pub use customer_service::CustomerService;
pub use dealer_service::DealerService;
pub use reservation_service::ReservationService;
