extern crate proc_macro;

macro_rules! bail {
    ($item:expr, $fmt:literal $($tts:tt)*) => {
        return Err(Error::new_spanned(
            &$item,
            format!(concat!("rememo: ", $fmt) $($tts)*)
        ))
    }
}

mod memo;

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{Error, Result};

/// Memoize a computation, fingerprinted by its source text.
///
/// Takes a memoizer, a closure without arguments and a list of dependencies.
/// The stored value is reused when the slot's previous value was produced by a
/// closure with the same source text and the same dependencies.
///
/// ```ignore
/// use rememo::{memo, Memoizer, Store};
///
/// let target = Store::new();
/// let (a, b) = (1, 2);
/// let memoizer = Memoizer::new(&target);
/// let sum = memo!(memoizer, || a + b, (a, b));
/// assert_eq!(sum, 3);
/// ```
#[proc_macro]
pub fn memo(stream: TokenStream) -> TokenStream {
    let call = syn::parse_macro_input!(stream as memo::Call);
    memo::expand(call, memo::Kind::Infallible)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Memoize a fallible computation, fingerprinted by its source text.
///
/// Like [`memo!`], but the closure returns a `Result`. Errors are passed
/// through and nothing is stored for them.
///
/// ```ignore
/// use rememo::{try_memo, HostError, Memoizer, Store};
///
/// let target = Store::new();
/// let memoizer = Memoizer::new(&target);
/// let parsed: Result<u32, HostError> = try_memo!(memoizer, || Ok("7".len() as u32), ());
/// assert_eq!(parsed, Ok(1));
/// ```
#[proc_macro]
pub fn try_memo(stream: TokenStream) -> TokenStream {
    let call = syn::parse_macro_input!(stream as memo::Call);
    memo::expand(call, memo::Kind::Fallible)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
