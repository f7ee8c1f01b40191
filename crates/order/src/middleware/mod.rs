mod cart_id;
