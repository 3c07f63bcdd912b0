//! Procedural macros for `polytensor`.
//!
//! `expand_impl` turns a single generic impl block into one impl per
//! concrete type listed in its arguments. Each entry has the form
//! `name<P=Replacement, ..., Bound: Trait>`:
//! * `P=Replacement` removes the generic parameter `P` (if declared) and
//!   substitutes every occurrence of the identifier `P` with `Replacement`,
//!   in types as well as in expression paths such as `Dtype::P`,
//! * any other predicate is appended to the impl's where clause.

extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};

use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Where;
use syn::visit_mut::VisitMut;
use syn::{parse_macro_input, ItemImpl, Type, WhereClause};

mod operation_syntax;
use operation_syntax::*;

mod search_replace;
use search_replace::*;

#[proc_macro_attribute]
pub fn expand_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let operation_sequence = parse_macro_input!(attr as OperationSequence);
    let item = parse_macro_input!(item as ItemImpl);

    let mut impl_blocks = Vec::new();

    for operation in operation_sequence.iter() {
        let bounds = match &operation.bounds {
            Some(bounds) => bounds,
            None => {
                let message = format!("`{}` needs substitutions, e.g. `{}<T=u8>`", operation.ident, operation.ident);
                return syn::Error::new(operation.ident.span(), message)
                    .to_compile_error()
                    .into();
            }
        };

        let mut impl_block = item.clone();

        for bound in bounds.iter() {
            match bound {
                OperationBound::Type(trait_bound) => {
                    impl_block.generics.where_clause =
                        if let Some(mut where_clause) = impl_block.generics.where_clause {
                            where_clause.predicates.push(trait_bound.clone());
                            Some(where_clause)
                        } else {
                            let mut predicates = Punctuated::new();
                            predicates.push(trait_bound.clone());

                            Some(WhereClause {
                                where_token: Where::default(),
                                predicates,
                            })
                        }
                }
                OperationBound::Eq(substitution) => {
                    let mut generics_visitor = RemoveGenerics {
                        find: substitution.lhs_ty.clone(),
                    };
                    let mut type_visitor = FindReplaceType {
                        find: substitution.lhs_ty.clone(),
                        replace: substitution.rhs_ty.clone(),
                    };
                    generics_visitor.visit_item_impl_mut(&mut impl_block);
                    type_visitor.visit_item_impl_mut(&mut impl_block);

                    // Bare identifiers are also substituted inside expressions
                    // and patterns (enum variants, associated paths).
                    if let Type::Path(path) = &substitution.rhs_ty {
                        if let Some(rhs_ident) = path.path.get_ident() {
                            let mut ident_visitor = FindReplaceIdent {
                                find: substitution.lhs_ty.clone(),
                                replace: Ident::new(&rhs_ident.to_string(), Span::call_site()),
                            };
                            ident_visitor.visit_item_impl_mut(&mut impl_block);
                        }
                    }
                }
            }
        }

        impl_blocks.push(impl_block);
    }

    let result = quote! {
        #(#impl_blocks)*
    };
    result.into()
}
