mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::Result as SynResult;

/// Implements `Component` for the type of an `impl` block.
///
/// Exactly one associated function must be marked with `#[inject]`. It
/// returns `Self` or `Result<Self, E>`, and each argument is resolved by
/// alias:
///
/// - by its binding name, so `repository: Arc<Repository>` resolves
///   `"repository"`,
/// - by `#[alias("name")]`, which is required for destructured arguments,
/// - or as every object registered under an alias with `#[all("name")]`.
///
/// The constructed object is an `Arc<Self>` unless the attribute names an
/// output type and a post-processor, as in
/// `#[component(Arc<dyn Greeter>, Arc::new)]`.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    match component_impl(attr, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn component_impl(attr: TokenStream, item: TokenStream) -> SynResult<TokenStream2> {
    let attr_data = attrs::parse_attributes(attr)?;
    let expanded = impls::expand_implementation(item, attr_data)?;
    Ok(expanded)
}
