use easley_jet::SourceSyntax;
use syn::{
    Token,
    parse::{Parse, ParseStream},
};

/// `"<div />"` or `"<div />" as tsx`.
pub(super) struct TemplateInput {
    pub src: syn::LitStr,
    pub syntax: SourceSyntax,
}

impl Parse for TemplateInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let src = input.parse()?;
        let syntax = if input.is_empty() {
            SourceSyntax::default()
        } else {
            let _as_token: Token![as] = input.parse()?;
            let dialect: syn::Ident = input.parse()?;
            match dialect.to_string().as_str() {
                "jsx" => SourceSyntax::Jsx,
                "tsx" => SourceSyntax::Tsx,
                _ => {
                    return Err(syn::Error::new_spanned(
                        dialect,
                        "expected `jsx` or `tsx`",
                    ));
                }
            }
        };
        let _: Option<Token![,]> = input.parse()?;

        Ok(Self { src, syntax })
    }
}
