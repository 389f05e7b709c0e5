pub(crate) mod prime;
