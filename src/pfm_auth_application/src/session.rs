use pfm_auth_core::{
    RefreshTokenRecord, RefreshTokenStore, SignedToken, TokenError, TokenHash, TokenPair,
    TokenSigner, User,
};

use crate::side_effect::best_effort;

/// Issues a token pair for `user` and records the refresh token digest.
///
/// Signing is on the critical path; storing the digest is best effort.
pub(crate) async fn open_session<R, S>(
    refresh_token_store: &R,
    token_signer: &S,
    user: &User,
) -> Result<TokenPair, TokenError>
where
    R: RefreshTokenStore,
    S: TokenSigner,
{
    let tokens = token_signer.issue_pair(user.id, &user.email)?;

    let record = RefreshTokenRecord::new(
        user.id,
        TokenHash::of(tokens.refresh_token.as_str()),
        token_signer.refresh_time_to_live(),
    );
    best_effort("store refresh token", refresh_token_store.create(record)).await;

    Ok(tokens)
}
