use std::{marker::PhantomData, ops};

use crate::{Act, Group, Monoid, Result};

pub trait Integer:
    Copy
    + Ord
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::BitXor<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;
    const MIN: Self;

    /// `len`個の`self`の和
    fn times(self, len: usize) -> Self;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Integer for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$t>::MAX;
                const MIN: Self = <$t>::MIN;

                fn times(self, len: usize) -> Self {
                    self * len as $t
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize);
impl_integer!(u8, u16, u32, u64, u128, usize);

macro_rules! define_op {
    ($($name:ident => $ctor:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name<T>(PhantomData<fn() -> T>);

            impl<T> Default for $name<T> {
                fn default() -> Self {
                    Self(PhantomData)
                }
            }

            pub const fn $ctor<T>() -> $name<T> {
                $name(PhantomData)
            }
        )*
    };
}

define_op!(Sum => sum, Product => product, BitXor => xor, Min => min, Max => max);

impl<T: Integer> Monoid for Sum<T> {
    type Element = T;

    fn identity(&self) -> T {
        T::ZERO
    }

    fn op(&self, a: &T, b: &T) -> T {
        *a + *b
    }
}

impl<T: Integer> Group for Sum<T> {
    fn op_inv(&self, total: &T, part: &T) -> Result<T> {
        Ok(*total - *part)
    }
}

/// 区間加算
impl<T: Integer> Act for Sum<T> {
    type Action = T;

    fn identity_action(&self) -> T {
        T::ZERO
    }

    fn apply(&self, value: &mut T, f: &T, len: usize) {
        *value = *value + f.times(len);
    }

    fn compose(&self, pending: &mut T, f: &T) {
        *pending = *pending + *f;
    }
}

impl<T: Integer> Monoid for Product<T> {
    type Element = T;

    fn identity(&self) -> T {
        T::ONE
    }

    fn op(&self, a: &T, b: &T) -> T {
        *a * *b
    }
}

impl<T: Integer> Monoid for BitXor<T> {
    type Element = T;

    fn identity(&self) -> T {
        T::ZERO
    }

    fn op(&self, a: &T, b: &T) -> T {
        *a ^ *b
    }
}

impl<T: Integer> Group for BitXor<T> {
    fn op_inv(&self, total: &T, part: &T) -> Result<T> {
        Ok(*total ^ *part)
    }
}

/// 区間xor
impl<T: Integer> Act for BitXor<T> {
    type Action = T;

    fn identity_action(&self) -> T {
        T::ZERO
    }

    fn apply(&self, value: &mut T, f: &T, len: usize) {
        if len & 1 == 1 {
            *value = *value ^ *f;
        }
    }

    fn compose(&self, pending: &mut T, f: &T) {
        *pending = *pending ^ *f;
    }
}

impl<T: Integer> Monoid for Min<T> {
    type Element = T;

    fn identity(&self) -> T {
        T::MAX
    }

    fn op(&self, a: &T, b: &T) -> T {
        if a < b {
            *a
        } else {
            *b
        }
    }
}

/// 区間加算
impl<T: Integer> Act for Min<T> {
    type Action = T;

    fn identity_action(&self) -> T {
        T::ZERO
    }

    fn apply(&self, value: &mut T, f: &T, _len: usize) {
        *value = *value + *f;
    }

    fn compose(&self, pending: &mut T, f: &T) {
        *pending = *pending + *f;
    }
}

impl<T: Integer> Monoid for Max<T> {
    type Element = T;

    fn identity(&self) -> T {
        T::MIN
    }

    fn op(&self, a: &T, b: &T) -> T {
        if a > b {
            *a
        } else {
            *b
        }
    }
}

/// 区間加算
impl<T: Integer> Act for Max<T> {
    type Action = T;

    fn identity_action(&self) -> T {
        T::ZERO
    }

    fn apply(&self, value: &mut T, f: &T, _len: usize) {
        *value = *value + *f;
    }

    fn compose(&self, pending: &mut T, f: &T) {
        *pending = *pending + *f;
    }
}
