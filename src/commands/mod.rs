pub type CmdResult<T> = fix_opacity::Result<(T, i32)>;

pub mod fix;
