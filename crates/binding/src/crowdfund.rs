//! Crowdfund contract bindings.
//!
//! Campaigns are launched with a goal and a `[start, end]` window, collect
//! pledges of the configured ERC20 token, and are either claimed by their
//! creator (goal reached) or refunded to pledgers (goal missed).

use alloy_sol_types::sol;

sol! {
    /// Crowdfund - campaign registry holding pledged tokens in escrow
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract Crowdfund {
        /// Pledge token is fixed at deployment
        constructor(address _token);

        /// Emitted when a campaign is canceled before it starts
        event Canceled(uint256 id);

        /// Emitted when the creator claims a successful campaign
        event Claimed(uint256 id, uint256 amount);

        /// Emitted when a new campaign is launched
        event Launched(address creator, uint256 goal, uint32 start, uint32 end);

        /// Emitted when tokens are pledged to a campaign
        event Pledged(address sender, uint256 id, uint256 amount);

        /// Emitted when a pledger is refunded from a failed campaign
        event Refunded(address sender, uint256 id, uint256 amount);

        /// Emitted when a pledge is withdrawn while the campaign is running
        event Unpledged(address sender, uint256 id, uint256 amount);

        /// Campaign window has already closed
        error CampaignClosed();

        /// Campaign window is still open
        error CampaignOngoing();

        /// Start time is in the past
        error InvalidStart();

        /// End time is before start or too far in the future
        error InvalidStartEnd();

        /// Caller did not launch the campaign
        error NotCreator();

        /// Cancel a campaign that has not started yet
        function cancel(uint256 _id) external;

        /// Claim pledged tokens of a successful campaign
        function claim(uint256 _id) external;

        /// Number of campaigns launched so far (also the last campaign id)
        function count() external view returns (uint256);

        /// Launch a new campaign
        function launch(uint256 _goal, uint32 _start, uint32 _end) external;

        /// Pledge tokens to a running campaign
        function pledge(uint256 _id, uint256 _amount) external;

        /// Refund the caller's pledge from a failed campaign
        function refund(uint256 _id) external;

        /// Address of the pledge token
        function token() external view returns (address);

        /// Withdraw part of a pledge while the campaign is running
        function unpledge(uint256 _id, uint256 _amount) external;
    }
}
