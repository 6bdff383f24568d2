alloy::sol! {
    #[sol(rpc)]
    interface IBittoToken {
        function name() view returns (string);
        function symbol() view returns (string);
        function decimals() view returns (uint8);
        function totalSupply() view returns (uint256);

        function balanceOf(address owner) view returns (uint256);
        function transfer(address to, uint256 value) returns (bool);

        // One transfer per index pair, all-or-nothing on the contract side.
        function batchTransfer(address[] recipients, uint256[] values) returns (bool);

        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}
