//! ERC20 token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// Token transfer interface the Crowdfund contract pulls pledges through
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    interface IERC20 {
        /// Transfer tokens to recipient
        function transfer(address, uint256) external returns (bool);

        /// Transfer tokens from sender to recipient (requires allowance)
        function transferFrom(address, address, uint256) external returns (bool);
    }
}
