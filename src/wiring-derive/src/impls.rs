use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::visit_mut::{self, VisitMut};
use syn::{
    AngleBracketedGenericArguments, Attribute, Error as SynError, FnArg, GenericArgument, Ident,
    ImplItem, ImplItemFn, ItemImpl, LitStr, Pat, PatType, Path, PathArguments,
    Result as SynResult, ReturnType, Signature, Type, TypePath,
};

use crate::attrs::AttributeData;

const RETURN_TYPE_MESSAGE: &str = "a constructor's return type should be `Self` or `Result<Self, E>`";

#[derive(Debug)]
struct ConstructorData {
    self_type: TypePath,
    identifier: Ident,
    arguments: Vec<ArgumentData>,
    return_type: ReturnTypeData,
}

#[derive(Debug)]
struct ArgumentData {
    span: Span,
    source: DependencySource,
}

#[derive(Debug)]
enum DependencySource {
    Alias(LitStr),
    All(LitStr),
}

#[derive(Debug)]
enum ReturnTypeData {
    Infallible,
    Result { error_type: Type },
}

struct AttributeRemovalVisitor;

impl AttributeRemovalVisitor {
    fn is_custom_attribute(attr: &Attribute) -> bool {
        let path = attr.path();
        path.is_ident("inject") || path.is_ident("alias") || path.is_ident("all")
    }
}

impl VisitMut for AttributeRemovalVisitor {
    fn visit_attributes_mut(&mut self, attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !Self::is_custom_attribute(attr));
        attrs
            .iter_mut()
            .for_each(|attr| visit_mut::visit_attribute_mut(self, attr));
    }
}

pub fn expand_implementation(
    impls: TokenStream,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let mut impls = match syn::parse::<ItemImpl>(impls) {
        Ok(impls) => impls,
        Err(err) => {
            return Err(SynError::new(
                err.span(),
                "`#[component]` should be annotated on the `impl` block",
            ))
        }
    };

    let self_type = get_self_type(&impls)?;
    let signature = get_constructor_signature(&impls.items, impls.span())?;
    let ctor_data = parse_constructor(self_type, signature)?;

    let expanded = expand_component_implementation(ctor_data, attr_data);

    let mut visitor = AttributeRemovalVisitor;
    visitor.visit_item_impl_mut(&mut impls);

    Ok(quote! {
        #impls
        #expanded
    })
}

fn get_self_type(impls: &ItemImpl) -> SynResult<TypePath> {
    if let Type::Path(ty) = impls.self_ty.as_ref() {
        Ok(ty.clone())
    } else {
        Err(SynError::new(impls.self_ty.span(), "invalid self type"))
    }
}

fn get_constructor_signature(items: &[ImplItem], impl_span: Span) -> SynResult<Signature> {
    let ctors: Vec<_> = items
        .iter()
        .filter_map(filter_and_map_item_fn)
        .filter(is_annotated_with_inject)
        .collect();

    let signature = match ctors.as_slice() {
        [ctor] => ctor.sig.clone(),
        [] => {
            return Err(SynError::new(
                impl_span,
                "no associated function is annotated with `#[inject]`",
            ))
        }
        _ => {
            return Err(SynError::new(
                impl_span,
                "only one associated function can be annotated with `#[inject]`",
            ))
        }
    };

    if let Some(FnArg::Receiver(rec)) = signature.inputs.first() {
        return Err(SynError::new(
            rec.span(),
            "method is not allowed to be annotated with `#[inject]`",
        ));
    }

    Ok(signature)
}

fn filter_and_map_item_fn(item: &ImplItem) -> Option<&ImplItemFn> {
    if let ImplItem::Fn(impl_fn) = item {
        Some(impl_fn)
    } else {
        None
    }
}

fn is_annotated_with_inject(item_fn: &&ImplItemFn) -> bool {
    item_fn
        .attrs
        .iter()
        .any(|attr| attr.path().is_ident("inject"))
}

fn parse_constructor(self_type: TypePath, signature: Signature) -> SynResult<ConstructorData> {
    let identifier = signature.ident;
    let arguments = parse_constructor_arguments(signature.inputs)?;
    let return_type = parse_constructor_return_type(signature.output, &self_type)?;

    Ok(ConstructorData {
        self_type,
        identifier,
        arguments,
        return_type,
    })
}

fn parse_constructor_arguments(inputs: Punctuated<FnArg, Comma>) -> SynResult<Vec<ArgumentData>> {
    inputs.into_iter().map(parse_argument).collect()
}

fn parse_argument(arg: FnArg) -> SynResult<ArgumentData> {
    let span = arg.span();
    let FnArg::Typed(PatType { attrs, pat, .. }) = arg else {
        return Err(SynError::new(
            span,
            "method is not allowed to be annotated with `#[inject]`",
        ));
    };

    let source = match parse_argument_attributes(&attrs)? {
        Some(source) => source,
        None => match pat.as_ref() {
            Pat::Ident(pat_ident) => {
                let alias = pat_ident.ident.unraw().to_string();
                DependencySource::Alias(LitStr::new(&alias, pat_ident.ident.span()))
            }
            other => {
                return Err(SynError::new(
                    other.span(),
                    "expects `#[alias(\"...\")]` or `#[all(\"...\")]` on an argument without a plain name",
                ))
            }
        },
    };

    Ok(ArgumentData { span, source })
}

fn parse_argument_attributes(attrs: &[Attribute]) -> SynResult<Option<DependencySource>> {
    let mut res = None;

    for attr in attrs {
        let path = attr.path();
        let source = if path.is_ident("alias") {
            DependencySource::Alias(parse_alias(attr)?)
        } else if path.is_ident("all") {
            DependencySource::All(parse_alias(attr)?)
        } else {
            continue;
        };

        if res.is_some() {
            return Err(SynError::new(
                attr.span(),
                "only one attribute of `#[alias(...)]` or `#[all(...)]` is allowed",
            ));
        }
        res = Some(source);
    }

    Ok(res)
}

fn parse_alias(attr: &Attribute) -> SynResult<LitStr> {
    let alias: LitStr = attr.parse_args().map_err(|err| {
        SynError::new(
            err.span(),
            "expects the alias as a string literal, such as `#[alias(\"name\")]`",
        )
    })?;

    if alias.value().is_empty() {
        Err(SynError::new(alias.span(), "an alias must be a non-empty string"))
    } else {
        Ok(alias)
    }
}

fn parse_constructor_return_type(
    output: ReturnType,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let ReturnType::Type(_, return_type) = output else {
        return Err(SynError::new(output.span(), RETURN_TYPE_MESSAGE));
    };
    let Type::Path(return_type) = *return_type else {
        return Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE));
    };

    if is_self_type(&return_type, self_type) {
        Ok(ReturnTypeData::Infallible)
    } else if let Some(arguments) = result_arguments(&return_type.path) {
        parse_result_return_type(arguments, self_type)
    } else {
        Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE))
    }
}

fn is_self_type(ty: &TypePath, self_type: &TypePath) -> bool {
    ty == self_type || (ty.qself.is_none() && ty.path.is_ident("Self"))
}

fn result_arguments(path: &Path) -> Option<&PathArguments> {
    let segments: Vec<_> = path.segments.iter().collect();
    match segments.as_slice() {
        [result] if result.ident == "Result" => Some(&result.arguments),
        [std, module, result]
            if std.ident == "std" && module.ident == "result" && result.ident == "Result" =>
        {
            Some(&result.arguments)
        }
        _ => None,
    }
}

fn parse_result_return_type(
    arguments: &PathArguments,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) = arguments
    else {
        return Err(SynError::new(arguments.span(), RETURN_TYPE_MESSAGE));
    };

    let mut iter = args.iter();
    match (iter.next(), iter.next(), iter.next()) {
        (
            Some(GenericArgument::Type(Type::Path(first_type))),
            Some(GenericArgument::Type(error_type)),
            None,
        ) if is_self_type(first_type, self_type) => Ok(ReturnTypeData::Result {
            error_type: error_type.clone(),
        }),
        _ => Err(SynError::new(args.span(), RETURN_TYPE_MESSAGE)),
    }
}

fn expand_component_implementation(
    ctor_data: ConstructorData,
    attr_data: AttributeData,
) -> TokenStream2 {
    let self_type = &ctor_data.self_type;
    let constructor = &ctor_data.identifier;

    let (output_type, post_process_body) = match &attr_data {
        AttributeData::Full {
            output_type,
            post_processor,
        } => (quote! { #output_type }, quote! { #post_processor(self) }),
        AttributeData::Default => (
            quote! { std::sync::Arc<Self> },
            quote! { std::sync::Arc::new(self) },
        ),
    };

    let associated_type_error =
        if let ReturnTypeData::Result { error_type } = &ctor_data.return_type {
            quote! { type Error = #error_type; }
        } else {
            quote! { type Error = std::convert::Infallible; }
        };

    let get_dep_statements = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = Ident::new(&format!("dep{i}"), arg.span);
            match &arg.source {
                DependencySource::Alias(alias) => quote! { let #dep = injector.get(#alias)?; },
                DependencySource::All(alias) => quote! { let #dep = injector.get_all(#alias)?; },
            }
        })
        .collect::<TokenStream2>();

    let dep_args = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = Ident::new(&format!("dep{i}"), arg.span);
            quote! { #dep, }
        })
        .collect::<TokenStream2>();

    let wire_deps = if let ReturnTypeData::Infallible = &ctor_data.return_type {
        quote! { Ok(Ok(Self::#constructor(#dep_args))) }
    } else {
        quote! { Ok(Self::#constructor(#dep_args)) }
    };

    quote! {
        impl wiring::provider::component::Component for #self_type {
            type Constructed = #output_type;
            #associated_type_error

            fn construct<I>(injector: &I) -> std::result::Result<
                std::result::Result<Self, Self::Error>,
                wiring::container::injector::InjectorError
            >
            where
                I: wiring::container::injector::TypedInjector + ?Sized
            {
                #get_dep_statements
                #wire_deps
            }

            fn post_process(self) -> Self::Constructed {
                #post_process_body
            }
        }
    }
}
