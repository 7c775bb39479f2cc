use proc_macro::TokenStream as TokenStream1;
use quote::{quote, ToTokens};

/// This macro is added before a method of `Round` in the impl block.
/// Use this macro to first check if current game phase is exactly the phase in
/// the attribute.
///
/// For example, `#[allowed_phase(PlayerActing)]` will make a method first check
/// if current game phase is `PlayerActing`. If not, the method returns
/// `GameError::WrongPhase` naming the method, the expected and the actual phase.
/// Both `GamePhase` and `GameError` must be in scope where the method lives.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let mut ast: syn::ImplItemFn = syn::parse(item).unwrap();
    let phase: syn::Ident = syn::parse(attr).expect("allowed_phase expects a single phase name");
    let method = ast.sig.ident.to_string();
    let early_return = quote! {
        if self.current_game_phase != GamePhase::#phase {
            return Err(GameError::WrongPhase {
                method: #method,
                expected: GamePhase::#phase,
                actual: self.current_game_phase,
            });
        }
    };
    let early_return: syn::Stmt = syn::parse2(early_return).unwrap();
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}
