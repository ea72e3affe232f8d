/// Ordered list of types known at compile time, implemented for tuples up to 12 elements.
pub trait TypeList {
    const LEN: usize;
}

/// Type at position `I` of a `TypeList`.
///
/// Only implemented for `I < LEN`: naming a position past the end is a build error.
pub trait At<const I: usize>: TypeList {
    type Type;
}

impl TypeList for () {
    const LEN: usize = 0;
}

macro_rules! impl_at {
    ([$($all:ident),+], $index:literal, $at:ident) => {
        impl<$($all),+> At<$index> for ($($all,)+) {
            type Type = $at;
        }
    };
}

macro_rules! impl_type_list {
    (@list $len:literal, [$($all:ident),+]) => {
        impl<$($all),+> TypeList for ($($all,)+) {
            const LEN: usize = $len;
        }
    };
    ($len:literal, $all:tt, $($index:literal => $at:ident),+ $(,)?) => {
        impl_type_list!(@list $len, $all);
        $(impl_at!($all, $index, $at);)+
    };
}

impl_type_list!(1, [A], 0 => A);
impl_type_list!(2, [A, B], 0 => A, 1 => B);
impl_type_list!(3, [A, B, C], 0 => A, 1 => B, 2 => C);
impl_type_list!(4, [A, B, C, D], 0 => A, 1 => B, 2 => C, 3 => D);
impl_type_list!(5, [A, B, C, D, E], 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_type_list!(6, [A, B, C, D, E, F], 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_type_list!(
    7,
    [A, B, C, D, E, F, G],
    0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G,
);
impl_type_list!(
    8,
    [A, B, C, D, E, F, G, H],
    0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H,
);
impl_type_list!(
    9,
    [A, B, C, D, E, F, G, H, J],
    0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => J,
);
impl_type_list!(
    10,
    [A, B, C, D, E, F, G, H, J, K],
    0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => J, 9 => K,
);
impl_type_list!(
    11,
    [A, B, C, D, E, F, G, H, J, K, L],
    0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => J, 9 => K, 10 => L,
);
impl_type_list!(
    12,
    [A, B, C, D, E, F, G, H, J, K, L, M],
    0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => J, 9 => K, 10 => L,
    11 => M,
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    fn type_at<L: At<I>, const I: usize>() -> TypeId
    where
        L::Type: 'static,
    {
        TypeId::of::<L::Type>()
    }

    #[test]
    fn lengths() {
        assert_eq!(<() as TypeList>::LEN, 0);
        assert_eq!(<(i64,) as TypeList>::LEN, 1);
        assert_eq!(<(i64, f64, String) as TypeList>::LEN, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as TypeList>::LEN,
            12
        );
    }

    #[test]
    fn positions() {
        type List = (i64, f64, String, Option<i64>);
        assert_eq!(type_at::<List, 0>(), TypeId::of::<i64>());
        assert_eq!(type_at::<List, 1>(), TypeId::of::<f64>());
        assert_eq!(type_at::<List, 2>(), TypeId::of::<String>());
        assert_eq!(type_at::<List, 3>(), TypeId::of::<Option<i64>>());
    }
}
