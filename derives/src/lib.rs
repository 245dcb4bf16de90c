extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Serialize a `bitflags` type as a list of kebab-case flag names.
///
/// An empty flag set serializes as an empty list.
#[proc_macro_derive(SerializeFlags)]
pub fn derive_serialize_flags(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;
    let gen = quote! {
        impl ::serde::Serialize for #name {
            fn serialize<S>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                use ::serde::ser::SerializeSeq;
                use ::util::StrExt;

                let names: ::std::vec::Vec<::std::string::String> = self
                    .iter_names()
                    .map(|(s, _)| s.to_kebab_case())
                    .collect();

                let mut seq = serializer.serialize_seq(
                    ::core::option::Option::Some(names.len()),
                )?;
                for n in &names {
                    seq.serialize_element(n)?;
                }
                seq.end()
            }
        }
    };
    gen.into()
}

/// Deserialize a `bitflags` type from a list of kebab-case flag names.
///
/// Unknown names are an error. A lone `"-"` element is read as the empty
/// set.
#[proc_macro_derive(DeserializeFlags)]
pub fn derive_deserialize_flags(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;
    let gen = quote! {
        impl<'de> ::serde::Deserialize<'de> for #name {
            fn deserialize<D>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::de::Deserializer<'de>,
            {
                use ::bitflags::Bits;
                use ::util::{HashMap, StrExt};
                type B = <#name as ::bitflags::Flags>::Bits;

                let s = <::std::vec::Vec<::std::string::String>
                    as ::serde::Deserialize>::deserialize(deserializer)?;

                if s.len() == 1 && s[0].as_str() == "-" {
                    return ::core::result::Result::Ok(
                        #name::from_bits_truncate(B::EMPTY),
                    );
                }

                let lookup: HashMap<::std::string::String, B> =
                    <#name as ::bitflags::Flags>::FLAGS
                        .iter()
                        .map(|f| (f.name().to_kebab_case(), f.value().bits()))
                        .collect();

                let mut bits = B::EMPTY;
                for name in s {
                    let bit: B = *lookup.get(name.as_str()).ok_or_else(|| {
                        <D::Error as ::serde::de::Error>::custom(
                            ::std::format!("unknown flag {name}"),
                        )
                    })?;

                    bits |= bit;
                }

                ::core::result::Result::Ok(#name::from_bits_truncate(bits))
            }
        }
    };
    gen.into()
}
