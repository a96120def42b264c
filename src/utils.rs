pub mod stratified_pick;
