// Domain layer: cart models and the ports the cart talks to.

pub mod model;
pub mod ports;
