use syn::parse::{Parse, ParseStream};

use super::*;

/// Whether the computation returns a `Result`.
pub enum Kind {
    Infallible,
    Fallible,
}

/// The arguments of a `memo!` invocation.
pub struct Call {
    memoizer: syn::Expr,
    closure: syn::ExprClosure,
    deps: syn::Expr,
}

impl Parse for Call {
    fn parse(input: ParseStream) -> Result<Self> {
        let memoizer = input.parse()?;
        let _: syn::Token![,] = input.parse()?;
        let closure = input.parse()?;
        let _: syn::Token![,] = input.parse()?;
        let deps = input.parse()?;
        if input.peek(syn::Token![,]) {
            let _: syn::Token![,] = input.parse()?;
        }
        Ok(Self { memoizer, closure, deps })
    }
}

/// Memoize a closure under the fingerprint of its source text.
pub fn expand(call: Call, kind: Kind) -> Result<proc_macro2::TokenStream> {
    let Call { memoizer, closure, deps } = call;

    if !closure.inputs.is_empty() {
        bail!(closure.inputs, "computations must not take arguments");
    }

    if let Some(asyncness) = &closure.asyncness {
        bail!(asyncness, "async computations are not supported");
    }

    // The closure's tokens as written, including any `move`.
    let source = closure.to_token_stream().to_string();

    let method = match kind {
        Kind::Infallible => quote! { memoize_with },
        Kind::Fallible => quote! { try_memoize_with },
    };

    Ok(quote! {
        (#memoizer).#method(
            ::rememo::Fingerprint::of_source(#source),
            #closure,
            #deps,
        )
    })
}
