/// Truthiness of a `require` condition.
///
/// Zero, `false`, `None`, `Err` and null pointers fail; everything else holds.
pub trait Condition {
    fn holds(&self) -> bool;
}

impl Condition for bool {
    fn holds(&self) -> bool {
        *self
    }
}

macro_rules! impl_condition_for_int {
    ($($ty:ty),*) => {
        $(
            impl Condition for $ty {
                fn holds(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_condition_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Condition for f32 {
    fn holds(&self) -> bool {
        *self != 0.0
    }
}

impl Condition for f64 {
    fn holds(&self) -> bool {
        *self != 0.0
    }
}

impl<T> Condition for Option<T> {
    fn holds(&self) -> bool {
        self.is_some()
    }
}

impl<T, E> Condition for Result<T, E> {
    fn holds(&self) -> bool {
        self.is_ok()
    }
}

impl<T: ?Sized> Condition for *const T {
    fn holds(&self) -> bool {
        !self.is_null()
    }
}

impl<T: ?Sized> Condition for *mut T {
    fn holds(&self) -> bool {
        !self.is_null()
    }
}

impl<T: Condition + ?Sized> Condition for &T {
    fn holds(&self) -> bool {
        (**self).holds()
    }
}
