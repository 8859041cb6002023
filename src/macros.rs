/// Implements `Copy`, `Clone`, `Default`, `Debug`, `PartialEq` and scalar
/// multiplication for a `#[repr(C)]` struct whose fields all share the type
/// parameter, plus slice views when the `unsafe` feature is enabled.
#[macro_export]
macro_rules! impl_standard_traits {
    ($type_name:ident, $type_param:ident, $($field:ident),+) => {
        impl<$type_param> Copy for $type_name<$type_param> where $type_param: Copy {}

        impl<$type_param> Clone for $type_name<$type_param>
        where
            $type_param: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    $($field: self.$field.clone()),+
                }
            }
        }

        impl<$type_param> Default for $type_name<$type_param>
        where
            $type_param: Default,
        {
            #[inline]
            fn default() -> Self {
                Self {
                    $($field: Default::default()),+
                }
            }
        }

        impl<$type_param> core::fmt::Debug for $type_name<$type_param>
        where
            $type_param: core::fmt::Debug,
        {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($type_name))
                    $(.field(&self.$field))+
                    .finish()
            }
        }

        impl<$type_param> PartialEq for $type_name<$type_param>
        where
            $type_param: PartialEq,
        {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                true $(&& self.$field == other.$field)+
            }
        }

        impl<$type_param> core::ops::Mul<$type_param> for $type_name<$type_param>
        where
            $type_param: core::ops::Mul<$type_param, Output = $type_param> + Clone,
        {
            type Output = $type_name<$type_param>;

            #[inline]
            fn mul(self, rhs: $type_param) -> Self::Output {
                Self {
                    $($field: self.$field * rhs.clone()),+
                }
            }
        }

        #[cfg_attr(docsrs, doc(cfg(feature = "unsafe")))]
        #[cfg(feature = "unsafe")]
        impl<$type_param> $type_name<$type_param>
        where
            $type_param: Default,
        {
            /// Constructs a new instance from a slice.
            #[allow(unused)]
            #[inline]
            pub fn from_slice(slice: &[$type_param]) -> &Self {
                assert_eq!(
                    slice.len(),
                    core::mem::size_of::<Self>() / core::mem::size_of::<$type_param>()
                );

                // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                unsafe { &*(slice.as_ptr() as *const Self) }
            }

            /// Constructs a new instance from a mutable slice.
            #[allow(unused)]
            #[inline]
            pub fn from_mut_slice(slice: &mut [$type_param]) -> &mut Self {
                assert_eq!(
                    slice.len(),
                    core::mem::size_of::<Self>() / core::mem::size_of::<$type_param>()
                );

                // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                unsafe { &mut *(slice.as_mut_ptr() as *mut Self) }
            }
        }

        #[cfg_attr(docsrs, doc(cfg(feature = "unsafe")))]
        #[cfg(feature = "unsafe")]
        impl<$type_param> core::convert::AsRef<[$type_param]> for $type_name<$type_param>
        where
            $type_param: Default,
        {
            fn as_ref(&self) -> &[$type_param] {
                unsafe {
                    // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                    core::slice::from_raw_parts(
                        self as *const _ as *const $type_param,
                        core::mem::size_of::<$type_name<$type_param>>()
                            / core::mem::size_of::<$type_param>(),
                    )
                }
            }
        }

        #[cfg_attr(docsrs, doc(cfg(feature = "unsafe")))]
        #[cfg(feature = "unsafe")]
        impl<$type_param> core::convert::AsMut<[$type_param]> for $type_name<$type_param>
        where
            $type_param: Default,
        {
            fn as_mut(&mut self) -> &mut [$type_param] {
                unsafe {
                    // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                    core::slice::from_raw_parts_mut(
                        self as *mut _ as *mut $type_param,
                        core::mem::size_of::<$type_name<$type_param>>()
                            / core::mem::size_of::<$type_param>(),
                    )
                }
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:lower>] {
                use super::*;

                #[test]
                fn test_clone_eq_default() {
                    let value = $type_name::<u32>::default();
                    let copy = value;
                    assert_eq!(value.clone(), copy);
                }

                #[test]
                fn test_scalar_mul() {
                    let value = $type_name::<u32> { $($field: 2),+ } * 3;
                    assert_eq!(value, $type_name::<u32> { $($field: 6),+ });
                }

                #[test]
                #[cfg(feature = "unsafe")]
                fn test_from_slice() {
                    const TYPE_SIZE: usize = core::mem::size_of::<$type_name<u32>>();
                    const NUM_ELEMS: usize = TYPE_SIZE / core::mem::size_of::<u32>();
                    const ARRAY_SIZE: usize = NUM_ELEMS + 1;
                    let data = [0; ARRAY_SIZE];
                    let state = $type_name::from_slice(&data[..NUM_ELEMS]);
                    assert_eq!(state.as_ref().len(), NUM_ELEMS);
                    assert!(core::ptr::eq(state.as_ref().as_ptr(), data.as_ptr()));
                }

                #[test]
                #[cfg(feature = "unsafe")]
                fn test_from_slice_mut() {
                    const TYPE_SIZE: usize = core::mem::size_of::<$type_name<u32>>();
                    const NUM_ELEMS: usize = TYPE_SIZE / core::mem::size_of::<u32>();
                    const ARRAY_SIZE: usize = NUM_ELEMS + 1;
                    let mut data = [0; ARRAY_SIZE];
                    {
                        let state = $type_name::from_mut_slice(&mut data[..NUM_ELEMS]);
                        state.as_mut()[0] = 10;
                    }
                    assert_eq!(data[0], 10, "expect data to be changed");
                }
            }
        }
    };
}
