//! Contract bindings for the reads a lane needs

use alloy::sol;

sol! {
    /// Token bucket as stored by on-ramps and token pools
    #[derive(Debug, PartialEq, Eq)]
    struct RateLimiterBucket {
        uint128 tokens;
        uint32 lastUpdated;
        bool isEnabled;
        uint128 capacity;
        uint128 rate;
    }

    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
        function allowance(address owner, address spender) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IRouter {
        function getOnRamp(uint64 destChainSelector) external view returns (address);
        function isChainSupported(uint64 chainSelector) external view returns (bool);
    }

    #[sol(rpc)]
    interface IOnRamp {
        function getPoolBySourceToken(uint64 destChainSelector, address sourceToken) external view returns (address);
        function currentRateLimiterState() external view returns (RateLimiterBucket memory);
    }

    #[sol(rpc)]
    interface ITokenPool {
        function getCurrentOutboundRateLimiterState(uint64 remoteChainSelector) external view returns (RateLimiterBucket memory);
    }
}
