//! `#[handler]` attribute macro.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    FnArg, GenericArgument, Ident, ItemFn, LitInt, LitStr, PathArguments, ReturnType, Token,
    Type, bracketed,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

/// Arguments for the `#[handler]` macro.
pub(crate) struct HandlerArgs {
    pub name: Option<String>,
    pub priority: Option<i32>,
    pub supports: Vec<LitStr>,
}

impl Parse for HandlerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut priority = None;
        let mut supports = Vec::new();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                "priority" => {
                    let negative = input.parse::<Option<Token![-]>>()?.is_some();
                    let lit: LitInt = input.parse()?;
                    let value: i64 = lit.base10_parse()?;
                    let value = if negative { -value } else { value };
                    let value = i32::try_from(value).map_err(|_| {
                        syn::Error::new(lit.span(), "priority must fit in an i32")
                    })?;
                    priority = Some(value);
                }
                "supports" => {
                    if input.peek(LitStr) {
                        supports.push(input.parse()?);
                    } else {
                        let content;
                        bracketed!(content in input);
                        let tokens = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                        supports.extend(tokens);
                    }
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(HandlerArgs {
            name,
            priority,
            supports,
        })
    }
}

/// Extracts `T` from a `Result<T, E>` return type.
fn ok_type(output: &ReturnType) -> Option<&Type> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };
    let Type::Path(path) = &**ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };
    match generics.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

/// Implementation of the `#[handler]` macro.
pub fn handler_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as HandlerArgs);
    let input = parse_macro_input!(item as ItemFn);

    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;
    let fn_output = &input.sig.output;

    if input.sig.asyncness.is_none() {
        return syn::Error::new_spanned(input.sig.fn_token, "Handler function must be async")
            .to_compile_error()
            .into();
    }

    let struct_name = if let Some(ref custom_name) = args.name {
        Ident::new(custom_name, fn_name.span())
    } else {
        fn_name.clone()
    };

    let inputs = &input.sig.inputs;
    if inputs.len() != 1 {
        return syn::Error::new_spanned(
            &input.sig,
            "Handler function must take exactly one argument: fn(args: &Args)",
        )
        .to_compile_error()
        .into();
    }

    let (args_pat, args_type) = match inputs.first() {
        Some(FnArg::Typed(pat_type)) => {
            if let Type::Reference(type_ref) = &*pat_type.ty {
                (&pat_type.pat, &type_ref.elem)
            } else {
                return syn::Error::new_spanned(
                    &pat_type.ty,
                    "Handler argument must be a reference (&Args)",
                )
                .to_compile_error()
                .into();
            }
        }
        _ => {
            return syn::Error::new_spanned(
                inputs,
                "Handler function must take an argument bundle: fn(args: &Args)",
            )
            .to_compile_error()
            .into();
        }
    };

    let Some(output_type) = ok_type(&input.sig.output) else {
        return syn::Error::new_spanned(
            &input.sig.output,
            "Handler function must return Result<T, BoxError>",
        )
        .to_compile_error()
        .into();
    };

    let priority = args.priority.unwrap_or(0);
    let supports = &args.supports;

    let expanded = quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #[doc = concat!("Auto-generated Handler from `#[chainr::handler]` on `", stringify!(#fn_name), "`")]
        #fn_vis struct #struct_name;

        impl #struct_name {
            /// The priority of this handler. Higher values run first.
            pub const PRIORITY: i32 = #priority;
            /// The tokens this handler claims.
            pub const SUPPORTS: &'static [&'static str] = &[#(#supports),*];
        }

        impl ::chainr::Handler<str, #args_type> for #struct_name {
            type Output = #output_type;

            fn supports(&self, token: &str) -> bool {
                Self::SUPPORTS.iter().any(|claimed| *claimed == token)
            }

            fn priority(&self) -> i32 {
                Self::PRIORITY
            }

            async fn handle(&self, #args_pat: &#args_type) #fn_output #fn_block
        }
    };

    TokenStream::from(expanded)
}
