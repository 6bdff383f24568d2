#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub CHAIN_ID: u64       = ("CHAIN_ID", 1);
    pub GAS_PRICE_WEI: u128 = ("GAS_PRICE_WEI", 0);
    pub MAX_BATCH: usize    = ("MAX_BATCH", 200);
}

/// Local development node, used when RPC_URL is not set.
pub const DEFAULT_RPC: &str = "http://127.0.0.1:9545";
