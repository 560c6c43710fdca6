//! Interface definitions for the vault factory and the contract families
//! reachable from a vault
//!
//! The contracts are deployed and owned elsewhere; these bindings are the
//! whole boundary. Reference interfaces mirror the deployed ABI surface,
//! not any particular Solidity source.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IVaultFactory {
        struct RoleParams {
            address roleManager;
            address versionManager;
            address whitelistManager;
            address limitManager;
            address curatorFeeClaimer;
        }

        struct FeeParams {
            uint16 curatorFee;
            address curatorFeeReceiver;
        }

        struct LimitParams {
            bool isDepositLimit;
            uint256 depositLimit;
            bool isPrivateVault;
        }

        struct TokenParams {
            address asset;
            string name;
            string symbol;
        }

        struct BaseParams {
            RoleParams roles;
            FeeParams fees;
            LimitParams limits;
            TokenParams token;
            string metadataURI;
        }

        struct DelegationParams {
            uint64 delegatorType;
            address operator;
            address network;
        }

        struct SlasherParams {
            uint64 slasherType;
            uint48 vetoDuration;
            uint256 resolverSetEpochsDelay;
        }

        struct BurnerParams {
            address owner;
            uint48 delay;
        }

        struct SymVaultParams {
            BaseParams base;
            uint48 epochDuration;
            DelegationParams delegation;
            SlasherParams slasher;
            BurnerParams burner;
        }

        struct EigenVaultParams {
            BaseParams base;
            address operator;
        }

        struct SuperVaultParams {
            BaseParams base;
            uint48 epochDuration;
            DelegationParams delegation;
            SlasherParams slasher;
            BurnerParams burner;
            address eigenOperator;
            uint256 symRatio;
        }

        event VaultCreated(address indexed vault, address indexed creator);

        function createSymVault(SymVaultParams calldata params) external returns (address);
        function createEigenVault(EigenVaultParams calldata params) external returns (address);
        function createSuperVault(SuperVaultParams calldata params) external returns (address);
    }

    /// Surface shared by every vault variant: ERC-4626-style accounting,
    /// role-gated admin controls and the metadata URI slot.
    #[sol(rpc)]
    interface IByzVault {
        function asset() external view returns (address);
        function totalAssets() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function convertToShares(uint256 assets) external view returns (uint256);
        function convertToAssets(uint256 shares) external view returns (uint256);

        function deposit(uint256 assets, address receiver) external returns (uint256);
        function withdraw(uint256 assets, address receiver, address owner) external returns (uint256);
        function redeem(uint256 shares, address receiver, address owner) external returns (uint256);

        function hasRole(bytes32 role, address account) external view returns (bool);
        function grantRole(bytes32 role, address account) external;
        function revokeRole(bytes32 role, address account) external;

        function isDepositLimit() external view returns (bool);
        function depositLimit() external view returns (uint256);
        function setDepositLimit(uint256 limit) external;

        function isDepositWhitelist() external view returns (bool);
        function setDepositWhitelist(bool status) external;
        function isWhitelistedDepositor(address account) external view returns (bool);
        function setWhitelistedDepositor(address account, bool status) external;

        function metadataURI() external view returns (string memory);
        function setMetadataURI(string calldata uri) external;
    }

    /// Exists only on Symbiotic-family vaults; used as the first probe.
    #[sol(rpc)]
    interface ISymbioticByzVault {
        function symVault() external view returns (address);
    }

    /// Exists only on EigenLayer-family vaults.
    #[sol(rpc)]
    interface IEigenByzVault {
        function delegationOperator() external view returns (address);
        function eigenStrategy() external view returns (address);
    }

    /// Composite vault splitting deposits between a Symbiotic-side and an
    /// EigenLayer-side vault at a configurable ratio.
    #[sol(rpc)]
    interface ISuperVault {
        function distributionRatio() external view returns (uint256[] memory);
        function underlyingVaults() external view returns (address symbioticVault, address eigenVault);
        function setDistributionRatio(uint256[] calldata ratio) external;
    }

    /// Symbiotic core vault reached through `symVault()`.
    #[sol(rpc)]
    interface ISymVault {
        function delegator() external view returns (address);
        function burner() external view returns (address);
        function slasher() external view returns (address);
        function collateral() external view returns (address);
        function currentEpoch() external view returns (uint256);
        function currentEpochStart() external view returns (uint48);
        function epochDuration() external view returns (uint48);
        function activeStake() external view returns (uint256);
    }

    #[sol(rpc)]
    interface IDelegator {
        function TYPE() external view returns (uint64);
        function operator() external view returns (address);
        function network() external view returns (address);
    }

    #[sol(rpc)]
    interface IBurnerRouter {
        function owner() external view returns (address);
        function delay() external view returns (uint48);
    }

    #[sol(rpc)]
    interface ISlasher {
        function TYPE() external view returns (uint64);
        function vetoDuration() external view returns (uint48);
        function resolverSetEpochsDelay() external view returns (uint256);
    }

    /// Custom errors emitted by the vault families, decoded during error
    /// normalization.
    #[derive(Debug, PartialEq, Eq)]
    interface IVaultErrors {
        error NotAuthorized(address account);
        error DepositLimitReached(uint256 limit, uint256 requested);
        error NotWhitelistedDepositor(address account);
        error InvalidEpochDuration(uint48 duration);
        error InvalidDistributionRatio(uint256 ratio);
        error VaultNotInitialized(address vault);
        error ZeroAddress();
        error ZeroShares();
    }
}
