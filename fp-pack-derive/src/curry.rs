//! Expansion of the `curry!` procedural macro.
//!
//! Two input forms are accepted:
//!
//! 1. A closure literal, whose parameter count is the arity:
//!    `curry!(|a, b, c| a + b + c)`
//! 2. Any function expression followed by an integer arity:
//!    `curry!(add, 2)`
//!
//! # Arity handling
//!
//! | arity | expansion                                   |
//! |-------|---------------------------------------------|
//! | 0     | the function is called immediately          |
//! | 1     | the function is returned unchanged          |
//! | n > 1 | a chain of `n` nested unary `move` closures |
//!
//! # Generated code for n > 1
//!
//! For `curry!(f, 3)` the expansion is:
//!
//! ```text
//! {
//!     let __fp_pack_function = Rc::new(f);
//!     move |__fp_pack_argument_0| {
//!         let __fp_pack_function = Rc::clone(&__fp_pack_function);
//!         let __fp_pack_argument_0 = Rc::new(__fp_pack_argument_0);
//!         move |__fp_pack_argument_1| {
//!             let __fp_pack_function = Rc::clone(&__fp_pack_function);
//!             let __fp_pack_argument_0 = Rc::clone(&__fp_pack_argument_0);
//!             let __fp_pack_argument_1 = Rc::new(__fp_pack_argument_1);
//!             move |__fp_pack_argument_2| {
//!                 __fp_pack_function(
//!                     Rc::unwrap_or_clone(Rc::clone(&__fp_pack_argument_0)),
//!                     Rc::unwrap_or_clone(Rc::clone(&__fp_pack_argument_1)),
//!                     __fp_pack_argument_2,
//!                 )
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! Sharing through `Rc` keeps every intermediate closure `Fn`, so a partial
//! application can be applied any number of times.

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, Lit, Token};

struct CurryInput {
    function: TokenStream2,
    arity: usize,
}

pub fn curry_impl(input: TokenStream) -> TokenStream {
    TokenStream::from(expand(input.into()))
}

pub(crate) fn expand(input: TokenStream2) -> TokenStream2 {
    match parse_curry_input(input) {
        Ok(CurryInput { function, arity }) => generate_curried(&function, arity),
        Err(error) => error.to_compile_error(),
    }
}

fn parse_curry_input(input: TokenStream2) -> syn::Result<CurryInput> {
    let parser = Punctuated::<Expr, Token![,]>::parse_terminated;
    let expressions = syn::parse::Parser::parse2(parser, input)?;
    let mut expressions = expressions.into_iter();

    match (expressions.next(), expressions.next(), expressions.next()) {
        (Some(Expr::Closure(closure)), None, None) => Ok(CurryInput {
            arity: closure.inputs.len(),
            function: quote! { #closure },
        }),
        (Some(other), None, None) => Err(syn::Error::new(
            other.span(),
            "curry! needs an arity when given a function name: curry!(function_name, 2)",
        )),
        (Some(function), Some(arity), None) => Ok(CurryInput {
            arity: parse_arity(&arity)?,
            function: quote! { #function },
        }),
        _ => Err(syn::Error::new(
            Span::call_site(),
            "curry! expects a closure, or a function followed by its arity",
        )),
    }
}

fn parse_arity(expression: &Expr) -> syn::Result<usize> {
    match expression {
        Expr::Lit(ExprLit {
            lit: Lit::Int(literal),
            ..
        }) => literal.base10_parse::<usize>(),
        other => Err(syn::Error::new(
            other.span(),
            "curry! expects an integer literal arity",
        )),
    }
}

fn generate_curried(function: &TokenStream2, arity: usize) -> TokenStream2 {
    match arity {
        0 => quote! { (#function)() },
        1 => quote! { { #function } },
        _ => generate_nested_closures(function, arity),
    }
}

fn generate_nested_closures(function: &TokenStream2, arity: usize) -> TokenStream2 {
    let arguments: Vec<Ident> = (0..arity)
        .map(|index| format_ident!("__fp_pack_argument_{}", index))
        .collect();

    let call_arguments = arguments.iter().enumerate().map(|(index, argument)| {
        if index + 1 == arity {
            quote! { #argument }
        } else {
            quote! { ::std::rc::Rc::unwrap_or_clone(::std::rc::Rc::clone(&#argument)) }
        }
    });

    let mut body = quote! { __fp_pack_function(#(#call_arguments),*) };

    for (index, argument) in arguments.iter().enumerate().rev() {
        body = if index + 1 == arity {
            quote! { move |#argument| { #body } }
        } else {
            let earlier = &arguments[..index];
            quote! {
                move |#argument| {
                    let __fp_pack_function = ::std::rc::Rc::clone(&__fp_pack_function);
                    #(let #earlier = ::std::rc::Rc::clone(&#earlier);)*
                    let #argument = ::std::rc::Rc::new(#argument);
                    #body
                }
            }
        };
    }

    quote! {
        {
            let __fp_pack_function = ::std::rc::Rc::new(#function);
            #body
        }
    }
}
