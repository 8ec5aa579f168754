/// A plain function called with its arguments packed in a tuple.
///
/// This lets [`FnHandler`](crate::FnHandler) treat functions of any arity up to eight the
/// same way: extract an argument tuple from the request, then hand it over in one call.
pub trait FnTrait<Args> {
    type Output;
    fn call(&self, args: Args) -> Self::Output;
}

// `impl FnTrait<(A, B)> for F where F: Fn(A, B) -> Out` and so on for every arity
macro_rules! impl_fn_trait_for_fn ({ $($param:ident)* } => {
    impl<Func, Out, $($param,)*> FnTrait<($($param,)*)> for Func
    where
        Func: Fn($($param),*) -> Out,
    {
        type Output = Out;

        #[inline]
        #[allow(non_snake_case, reason = "tuple fields reuse the type parameter names")]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }
});

impl_fn_trait_for_fn! {}
impl_fn_trait_for_fn! { A }
impl_fn_trait_for_fn! { A B }
impl_fn_trait_for_fn! { A B C }
impl_fn_trait_for_fn! { A B C D }
impl_fn_trait_for_fn! { A B C D E }
impl_fn_trait_for_fn! { A B C D E F }
impl_fn_trait_for_fn! { A B C D E F G }
impl_fn_trait_for_fn! { A B C D E F G H }
