pub mod db_utils;
pub mod national_id_cache;
pub mod national_id_filter;
