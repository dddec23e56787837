use std::borrow::Cow;
use std::cmp::Reverse;

/// A totally ordered key that may be able to represent "no key".
///
/// Most key types can never be null and get the default implementation:
///
/// ```
/// use avl_engine::Key;
///
/// #[derive(PartialEq, Eq, PartialOrd, Ord)]
/// struct UserId(u64);
///
/// impl Key for UserId {}
/// ```
///
/// Tuples of up to twelve elements, arrays, slices, [`Reverse`] and [`Cow`]
/// are keys whenever their contents are [`Ord`].
///
/// `Option<T>` is a key whose `None` is null. Operations given a null key
/// fail with [`Error::IllegalNullKey`](crate::Error::IllegalNullKey) before
/// touching the tree.
pub trait Key: Ord {
    /// Returns true if this key stands for "no key".
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! impl_key {
    ($($t:ty),* $(,)?) => {
        $(impl Key for $t {})*
    };
}

impl_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_key!((), bool, char, str, String);

macro_rules! impl_key_for_tuple {
    ($($name:ident)+) => {
        impl<$($name: Ord),+> Key for ($($name,)+) {}
    };
}

impl_key_for_tuple!(A);
impl_key_for_tuple!(A B);
impl_key_for_tuple!(A B C);
impl_key_for_tuple!(A B C D);
impl_key_for_tuple!(A B C D E);
impl_key_for_tuple!(A B C D E F);
impl_key_for_tuple!(A B C D E F G);
impl_key_for_tuple!(A B C D E F G H);
impl_key_for_tuple!(A B C D E F G H I);
impl_key_for_tuple!(A B C D E F G H I J);
impl_key_for_tuple!(A B C D E F G H I J K);
impl_key_for_tuple!(A B C D E F G H I J K L);

impl<T: Ord> Key for Vec<T> {}

impl<T: Ord> Key for [T] {}

impl<T: Ord, const N: usize> Key for [T; N] {}

impl<T: Ord> Key for Reverse<T> {}

impl<B: Ord + ToOwned + ?Sized> Key for Cow<'_, B> {}

impl<T: Ord> Key for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: Key + ?Sized> Key for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Key + ?Sized> Key for Box<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}
