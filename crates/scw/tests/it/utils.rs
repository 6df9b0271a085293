use alloy_primitives::{Address, address};
use alloy_sol_types::SolCall;
use scw::{ISmartContractWallet, WalletApp};
use scw_wallets::testing::ScriptedWallet;
use std::sync::Arc;

pub const CONTRACT: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
pub const AAA: Address = address!("0xAaAaAaaaAAaaAaaAaaAAAAAaaAAaaaAaAaAAaAAa");
pub const BBB: Address = address!("0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB");
pub const CCC: Address = address!("0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC");

/// Scripts the result of the next `owner()` read only.
pub fn queue_owner(wallet: &ScriptedWallet, owner: Address) {
    let ret = ISmartContractWallet::ownerCall::abi_encode_returns(&owner);
    wallet.push_call_result(Ok(ret.into()));
}

/// Scripts the result of every later `owner()` read.
pub fn owner_is(wallet: &ScriptedWallet, owner: Address) {
    let ret = ISmartContractWallet::ownerCall::abi_encode_returns(&owner);
    wallet.set_call_result(Ok(ret.into()));
}

/// An app whose wallet already authorized `account`, mounted with `owner` as the contract owner.
pub async fn mounted_app(account: Address, owner: Address) -> (Arc<ScriptedWallet>, WalletApp) {
    let wallet = Arc::new(ScriptedWallet::new());
    wallet.set_authorized([account]);
    owner_is(&wallet, owner);
    let app = WalletApp::new(Some(wallet.clone()), CONTRACT);
    app.mount().await;
    (wallet, app)
}
