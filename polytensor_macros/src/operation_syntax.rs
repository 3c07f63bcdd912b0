use proc_macro2::{Ident, TokenStream};
use quote::ToTokens;
use std::ops::Deref;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Result, Token, Type, WherePredicate};

/// `Ident = Type` substitution, e.g. `T=u8`.
pub struct EqPredicate {
    pub lhs_ty: Ident,
    pub eq_token: Token![=],
    pub rhs_ty: Type,
}

impl Parse for EqPredicate {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(EqPredicate {
            lhs_ty: input.parse()?,
            eq_token: input.parse()?,
            rhs_ty: input.parse()?,
        })
    }
}

impl ToTokens for EqPredicate {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.lhs_ty.to_tokens(tokens);
        self.eq_token.to_tokens(tokens);
        self.rhs_ty.to_tokens(tokens);
    }
}

pub enum OperationBound {
    Type(WherePredicate),
    Eq(EqPredicate),
}

impl Parse for OperationBound {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek2(Token![=]) {
            Ok(OperationBound::Eq(input.parse()?))
        } else {
            Ok(OperationBound::Type(input.parse()?))
        }
    }
}

/// One entry of the `expand_impl` argument list: `name<bounds>`.
pub struct Operation {
    pub ident: Ident,
    pub bounds: Option<Punctuated<OperationBound, Comma>>,
}

impl Parse for Operation {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident = input.parse()?;

        let bounds = if input.peek(Token![<]) {
            input.parse::<Token![<]>()?;
            let mut args = Punctuated::new();
            loop {
                if input.peek(Token![>]) {
                    break;
                }
                let value = input.parse()?;
                args.push_value(value);
                if input.peek(Token![>]) {
                    break;
                }
                let punct = input.parse()?;
                args.push_punct(punct);
            }
            input.parse::<Token![>]>()?;
            Some(args)
        } else {
            None
        };

        Ok(Operation { ident, bounds })
    }
}

pub struct OperationSequence {
    pub sequence: Punctuated<Operation, Comma>,
}

impl Parse for OperationSequence {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(OperationSequence {
            sequence: Punctuated::parse_terminated(input)?,
        })
    }
}

impl Deref for OperationSequence {
    type Target = Punctuated<Operation, Comma>;
    fn deref(&self) -> &Self::Target {
        &self.sequence
    }
}
