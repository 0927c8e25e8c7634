use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, Pat, ReturnType};

#[derive(Eq, PartialEq)]
enum ProcLogLevel {
    Trace,
    Debug,
}

// #[log(trace)] or #[log(debug)]
//
// #[log(trace)] logs the function arguments and return value
// #[log(trace)] is only applicable to function which parameters and return type implement Debug
//
// #[log(debug)] logs the function arguments and their types
//
// Note: unless the logger level is Trace, #[log(trace)] falls back to #[log(debug)]

#[proc_macro_attribute]
pub fn log(attr: TokenStream, item: TokenStream) -> TokenStream {
    let log_level = attr.to_string().trim_matches('"').trim().to_lowercase();
    let log_level = match log_level.as_str() {
        "trace" => ProcLogLevel::Trace,
        "debug" => ProcLogLevel::Debug,
        other => {
            return syn::Error::new(
                Span::call_site(),
                format!("invalid log level `{}`, expected `trace` or `debug`", other),
            )
            .to_compile_error()
            .into();
        }
    };

    let input_fn: ItemFn = parse_macro_input!(item as ItemFn);
    let fn_name = &input_fn.sig.ident;
    let args = &input_fn.sig.inputs;
    let is_async = input_fn.sig.asyncness.is_some();
    let fn_block = &input_fn.block;

    let log_args_type = args.iter().filter_map(|arg| {
        if let FnArg::Typed(pat_type) = arg {
            if let Pat::Ident(ref pat_ident) = *pat_type.pat {
                let pat_ident = &pat_ident.ident;
                let pat_type = &pat_type.ty;
                Some(quote! { format!("{}: {}", stringify!(#pat_ident), stringify!(#pat_type)) })
            } else { None }
        } else { None }
    });

    let log_args_value = args.iter().filter_map(|arg| {
        if let FnArg::Typed(pat_type) = arg {
            if let Pat::Ident(ref pat_ident) = *pat_type.pat {
                let pat_ident = &pat_ident.ident;
                Some(quote! { format!("{}: {:?}", stringify!(#pat_ident), #pat_ident) })
            } else { None }
        } else { None }
    });

    // "(a: i32, b: i32)"
    let log_args_type = quote! { format!("({})", <[::std::string::String]>::join(&[#(#log_args_type),*], ", ")) };
    // "(a: 2, b: 3)"
    let log_args_value = quote! { format!("({})", <[::std::string::String]>::join(&[#(#log_args_value),*], ", ")) };

    let ret_ty = match &input_fn.sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let call_body = if is_async {
        quote! { let result = (async move { #fn_block }).await; }
    } else {
        quote! { let result = (move || -> #ret_ty { #fn_block })(); }
    };

    let module_path = quote! { module_path!() };
    let tracing = quote! { ::logger::get_loglevel() == ::logger::LogLevel::Trace };
    let debugging = quote! { ::logger::logger().enabled(::logger::LogLevel::Debug) };

    let (log_enter, log_exit) = match log_level {
        ProcLogLevel::Trace => (
            quote! {
                if #tracing {
                    ::logger::trace!("Function call {}::{}{}", #module_path, stringify!(#fn_name), #log_args_value);
                }
                else if #debugging {
                    ::logger::debug!("Function call {}::{}{}", #module_path, stringify!(#fn_name), #log_args_type);
                }
            },
            quote! {
                if #tracing {
                    ::logger::trace!("Function {}::{} returned: {:?}", #module_path, stringify!(#fn_name), result);
                }
                else {
                    ::logger::debug!("Function {}::{} returned.", #module_path, stringify!(#fn_name));
                }
            }
        ),
        ProcLogLevel::Debug => (
            quote! {
                if #debugging {
                    ::logger::debug!("Function call {}::{}{}", #module_path, stringify!(#fn_name), #log_args_type);
                }
            },
            quote! { ::logger::debug!("Function {}::{} returned.", #module_path, stringify!(#fn_name)); }
        ),
    };

    let attributes = &input_fn.attrs;
    let visibility = &input_fn.vis;
    let signature = &input_fn.sig;

    let expanded = quote! {
        #(#attributes)* #visibility #signature {
            #log_enter
            #call_body
            #log_exit
            result
        }
    };

    TokenStream::from(expanded)
}
