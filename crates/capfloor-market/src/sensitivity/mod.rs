//! Sensitivities: point sensitivities emitted by pricers and the parameter
//! sensitivities they resolve to.

pub mod parameter;
pub mod point;

pub use parameter::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};
pub use point::{
    CapletVolatilitySensitivity, IborRateSensitivity, PointSensitivities, PointSensitivity,
    PointSensitivityBuilder, SabrParameterSensitivity, SabrParameterType, ZeroRateSensitivity,
};
