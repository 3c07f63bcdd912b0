//! `ring` provides the additive and multiplicative identities of the
//! numeric element types, which is what `ones` and `zeros` fill with.
//!
//! Implementations are stamped out for every numeric dtype with the
//! `expand_impl` procedural macro from `polytensor_macros`. The `string`
//! dtype deliberately has no `Ring` implementation.

use polytensor_macros::expand_impl;

pub trait Ring {
    const ZERO: Self;
    const ONE: Self;
}

#[expand_impl(
    _f64<T=f64>,
    _f32<T=f32>,
)]
impl<T> Ring for T {
    const ZERO: T = 0.0;
    const ONE: T = 1.0;
}

#[expand_impl(
    _u64<T=u64>,
    _u32<T=u32>,
    _u16<T=u16>,
    _u8<T=u8>,
    _i64<T=i64>,
    _i32<T=i32>,
    _i16<T=i16>,
    _i8<T=i8>,
)]
impl<T> Ring for T {
    const ZERO: T = 0;
    const ONE: T = 1;
}
