//! Procedural macros for chainr.
//!
//! - `#[handler]` - turns an `async fn` into a unit struct implementing `Handler<str, A>`

use proc_macro::TokenStream;

mod handler;

/// Turns an `async fn(args: &A) -> Result<R, BoxError>` into a handler.
///
/// The generated unit struct has the function's name (or `name = "..."`),
/// claims the string tokens listed in `supports`, and carries `priority`
/// (default 0).
///
/// ```rust,ignore
/// #[chainr::handler(supports = ["pdf", "application/pdf"], priority = 10)]
/// async fn pdf_summary(doc: &Document) -> Result<Summary, BoxError> {
///     Ok(Summary::from_pages(doc.pages()))
/// }
///
/// resolver.add(pdf_summary);
/// ```
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    handler::handler_impl(attr, item)
}
