//! Marker attribute for auto-analytics.
//!
//! `#[auto_analytics_event]` has no effect on the item it annotates. It only
//! flags the declaration for the source-level discovery pass run by
//! `auto_analytics_codegen`, the same way a source-retention annotation
//! would:
//!
//! ```text
//! #[auto_analytics_event]
//! pub enum Lifecycle {
//!     ActivityCreated,
//!     ActivityDestroyed,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;

/// Flag a closed event type for tracking-function generation.
///
/// The attribute takes no arguments and returns the item unchanged. Items
/// that are not enums are accepted here and reported by the generator.
#[proc_macro_attribute]
pub fn auto_analytics_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    if attr.is_empty() {
        return item;
    }

    let attr = proc_macro2::TokenStream::from(attr);
    let item = proc_macro2::TokenStream::from(item);
    let error = syn::Error::new_spanned(attr, "#[auto_analytics_event] takes no arguments")
        .to_compile_error();
    quote! {
        #error
        #item
    }
    .into()
}
